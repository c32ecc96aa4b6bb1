use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::currency::RateProvider;
use crate::db::DocumentStore;

/// Shared application state, passed to all route handlers via
/// `axum::extract::State`.
pub struct AppState {
    pub config: AppConfig,
    pub db: DocumentStore,
    pub rates: Arc<dyn RateProvider>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DocumentStore,
        rates: Arc<dyn RateProvider>,
    ) -> Arc<Self> {
        Arc::new(AppState { config, db, rates })
    }
}
