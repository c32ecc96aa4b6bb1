use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::db::carts;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartBody {
    product_id: String,
    qty: i64,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/cart", get(get_cart).post(add_to_cart))
        .route("/api/cart/{product_id}", delete(remove_from_cart))
}

async fn get_cart(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let cart = carts::cart_view(&state.db, &state.config.demo_user)?;

    Ok(Json(json!({
        "success": true,
        "data": { "cart": cart },
    })))
}

async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddToCartBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if body.product_id.is_empty() {
        return Err(ApiError::BadRequest("Product ID is required".to_string()));
    }
    let qty = u32::try_from(body.qty).ok().filter(|q| *q > 0).ok_or_else(|| {
        ApiError::BadRequest("Quantity must be a positive integer".to_string())
    })?;

    let cart = carts::add_to_cart(&state.db, &state.config.demo_user, &body.product_id, qty)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": { "cart": cart },
        })),
    ))
}

async fn remove_from_cart(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let cart = carts::remove_from_cart(&state.db, &state.config.demo_user, &product_id)?;

    Ok(Json(json!({
        "success": true,
        "data": { "cart": cart },
    })))
}
