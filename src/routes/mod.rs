pub mod cart;
pub mod checkout;
pub mod products;
pub mod rates;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the API router.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(products::routes())
        .merge(cart::routes())
        .merge(checkout::routes())
        .merge(rates::routes())
}
