//! Cart documents and the computed cart view.
//!
//! A cart stores only product references and quantities; prices are
//! resolved against the live catalog whenever a view is built, so a
//! price change is reflected on the next read.

use serde::{Deserialize, Serialize};

use crate::db::{DocumentStore, products};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub qty: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDoc {
    pub user_id: String,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub qty: u32,
    pub unit_price: f64,
    pub line_total: f64,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: f64,
}

impl CartView {
    fn empty() -> Self {
        CartView {
            items: Vec::new(),
            total: 0.0,
        }
    }
}

fn load_cart(db: &DocumentStore, user_id: &str) -> Result<Option<CartDoc>, ApiError> {
    match db.carts.get(user_id)? {
        Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
        None => Ok(None),
    }
}

fn save_cart(db: &DocumentStore, cart: &CartDoc) -> Result<(), ApiError> {
    db.carts.insert(&cart.user_id, serde_json::to_vec(cart)?)?;
    Ok(())
}

/// The user's cart with catalog names and prices joined in, plus the
/// summed total.
pub fn cart_view(db: &DocumentStore, user_id: &str) -> Result<CartView, ApiError> {
    let Some(cart) = load_cart(db, user_id)? else {
        return Ok(CartView::empty());
    };
    if cart.items.is_empty() {
        return Ok(CartView::empty());
    }

    let mut lines = Vec::with_capacity(cart.items.len());
    let mut total = 0.0;
    for item in &cart.items {
        let product = products::get_product(db, &item.product_id)?.ok_or_else(|| {
            ApiError::NotFound(format!("Product {} not found", item.product_id))
        })?;

        let line_total = product.price * f64::from(item.qty);
        total += line_total;
        lines.push(CartLine {
            product_id: item.product_id.clone(),
            name: product.name,
            qty: item.qty,
            unit_price: product.price,
            line_total,
            image_url: product.image_url,
        });
    }

    Ok(CartView {
        items: lines,
        total,
    })
}

/// Adds `qty` of a product, incrementing an existing line if present.
pub fn add_to_cart(
    db: &DocumentStore,
    user_id: &str,
    product_id: &str,
    qty: u32,
) -> Result<CartView, ApiError> {
    if products::get_product(db, product_id)?.is_none() {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    let mut cart = load_cart(db, user_id)?.unwrap_or_else(|| CartDoc {
        user_id: user_id.to_string(),
        items: Vec::new(),
    });

    match cart.items.iter_mut().find(|item| item.product_id == product_id) {
        Some(item) => item.qty += qty,
        None => cart.items.push(CartItem {
            product_id: product_id.to_string(),
            qty,
        }),
    }

    save_cart(db, &cart)?;
    cart_view(db, user_id)
}

/// Removes a product line entirely. Removing an absent line is a no-op.
pub fn remove_from_cart(
    db: &DocumentStore,
    user_id: &str,
    product_id: &str,
) -> Result<CartView, ApiError> {
    let Some(mut cart) = load_cart(db, user_id)? else {
        return Ok(CartView::empty());
    };

    cart.items.retain(|item| item.product_id != product_id);
    save_cart(db, &cart)?;
    cart_view(db, user_id)
}

pub fn clear_cart(db: &DocumentStore, user_id: &str) -> Result<(), ApiError> {
    db.carts.remove(user_id)?;
    Ok(())
}
