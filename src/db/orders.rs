//! Order documents and checkout receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{DocumentStore, carts, products};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub qty: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub customer: Customer,
    pub created_at: DateTime<Utc>,
}

/// One line of a checkout request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: String,
    pub qty: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub name: String,
    pub qty: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_id: String,
    pub total: f64,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<ReceiptItem>,
    pub customer: Customer,
}

/// Creates an order from the submitted lines, pricing every item from
/// the live catalog, then clears the user's cart.
pub fn create_order(
    db: &DocumentStore,
    user_id: &str,
    name: &str,
    email: &str,
    cart_items: &[CheckoutItem],
) -> Result<Receipt, ApiError> {
    let mut order_items = Vec::with_capacity(cart_items.len());
    let mut total = 0.0;
    for item in cart_items {
        let product = products::get_product(db, &item.product_id)?.ok_or_else(|| {
            ApiError::NotFound(format!("Product {} not found", item.product_id))
        })?;

        let line_total = product.price * f64::from(item.qty);
        total += line_total;
        order_items.push(OrderItem {
            product_id: item.product_id.clone(),
            name: product.name,
            qty: item.qty,
            unit_price: product.price,
            line_total,
        });
    }

    let order = Order {
        order_id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        items: order_items,
        total,
        customer: Customer {
            name: name.to_string(),
            email: email.to_string(),
        },
        created_at: Utc::now(),
    };

    db.orders
        .insert(&order.order_id, serde_json::to_vec(&order)?)?;

    carts::clear_cart(db, user_id)?;

    let receipt_items = order
        .items
        .iter()
        .map(|item| ReceiptItem {
            name: item.name.clone(),
            qty: item.qty,
            unit_price: item.unit_price,
            line_total: item.line_total,
        })
        .collect();

    Ok(Receipt {
        order_id: order.order_id,
        total: order.total,
        timestamp: order.created_at,
        items: receipt_items,
        customer: order.customer,
    })
}

pub fn get_order(db: &DocumentStore, order_id: &str) -> Result<Order, ApiError> {
    match db.orders.get(order_id)? {
        Some(value) => Ok(serde_json::from_slice(&value)?),
        None => Err(ApiError::NotFound("Order not found".to_string())),
    }
}
