use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::currency::CurrencyCode;
use crate::error::ApiError;
use crate::state::AppState;

/// Backend proxy for the external quote source, so clients never need
/// to talk to it directly. Conversion stays presentation-only: nothing
/// persisted or transmitted elsewhere in the API is affected.
#[derive(Debug, Deserialize)]
pub struct RateQuery {
    from: String,
    to: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/exchange-rate", get(get_exchange_rate))
}

async fn get_exchange_rate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RateQuery>,
) -> Result<Json<Value>, ApiError> {
    let from: CurrencyCode = query
        .from
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unsupported currency code: {}", query.from)))?;
    let to: CurrencyCode = query
        .to
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unsupported currency code: {}", query.to)))?;

    let rate = state.rates.get_rate(from, to).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "from": from, "to": to, "rate": rate },
    })))
}
