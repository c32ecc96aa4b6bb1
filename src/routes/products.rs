use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::db::products;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/products", get(get_products))
}

async fn get_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    // The demo catalog is seeded lazily on first access.
    products::ensure_demo_catalog(&state.db)?;
    let products = products::list_products(&state.db)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "products": products,
            // Every price is in this currency; clients convert for
            // display only.
            "baseCurrency": state.config.base_currency,
        },
    })))
}
