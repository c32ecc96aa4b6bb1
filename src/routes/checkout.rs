use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::db::orders::{self, CheckoutItem};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    name: String,
    email: String,
    cart_items: Vec<CheckoutLineBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLineBody {
    product_id: String,
    qty: i64,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/checkout", post(checkout))
        .route("/api/checkout/order/{order_id}", get(get_order))
}

fn validate_checkout(body: &CheckoutBody) -> Result<Vec<CheckoutItem>, ApiError> {
    if body.name.trim().chars().count() < 2 {
        return Err(ApiError::BadRequest(
            "Name must be at least 2 characters".to_string(),
        ));
    }
    if !is_plausible_email(&body.email) {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }
    if body.cart_items.is_empty() {
        return Err(ApiError::BadRequest("Cart must not be empty".to_string()));
    }

    let mut items = Vec::with_capacity(body.cart_items.len());
    for line in &body.cart_items {
        if line.product_id.is_empty() {
            return Err(ApiError::BadRequest("Product ID is required".to_string()));
        }
        let qty = u32::try_from(line.qty).ok().filter(|q| *q > 0).ok_or_else(|| {
            ApiError::BadRequest("Quantity must be a positive integer".to_string())
        })?;
        items.push(CheckoutItem {
            product_id: line.product_id.clone(),
            qty,
        });
    }
    Ok(items)
}

// Structural check only; enough to reject obvious typos in a demo.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !email.chars().any(char::is_whitespace)
}

async fn checkout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckoutBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let items = validate_checkout(&body)?;

    let receipt = orders::create_order(
        &state.db,
        &state.config.demo_user,
        body.name.trim(),
        &body.email,
        &items,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": { "receipt": receipt },
        })),
    ))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let order = orders::get_order(&state.db, &order_id)?;

    Ok(Json(json!({
        "success": true,
        "data": { "order": order },
    })))
}
