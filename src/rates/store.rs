//! In-memory exchange-rate cache.

use crate::core::currency::CurrencyPair;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Default time-to-live for cached rates.
pub const DEFAULT_RATE_TTL: Duration = Duration::from_secs(30 * 60);

struct RateEntry {
    rate: f64,
    expires_at: Instant,
}

/// Process-wide memoization of exchange rates keyed by ordered currency
/// pair.
///
/// Entries are immutable values replaced whole on `put`, so every
/// mutation is atomic at the granularity of a single pair and the last
/// writer wins. `get` treats an expired entry as absent without evicting
/// it; the next successful fetch overwrites it in place. The pair space
/// is small and finite, so there is no size bound or eviction pass.
pub struct RateStore {
    inner: Mutex<HashMap<CurrencyPair, RateEntry>>,
}

impl RateStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached rate for `pair` if present and not expired.
    pub async fn get(&self, pair: &CurrencyPair) -> Option<f64> {
        let cache = self.inner.lock().await;
        if let Some(entry) = cache.get(pair) {
            if Instant::now() < entry.expires_at {
                debug!("Rate cache HIT for pair: {:?}", pair);
                return Some(entry.rate);
            }
            debug!("Rate cache entry expired for pair: {:?}", pair);
            return None;
        }
        debug!("Rate cache MISS for pair: {:?}", pair);
        None
    }

    /// Stores `rate` for `pair`, unconditionally replacing any prior
    /// entry.
    pub async fn put(&self, pair: CurrencyPair, rate: f64, ttl: Duration) {
        let entry = RateEntry {
            rate,
            expires_at: Instant::now() + ttl,
        };
        let mut cache = self.inner.lock().await;
        debug!("Rate cache PUT for pair: {:?}", pair);
        cache.insert(pair, entry);
    }
}

impl Default for RateStore {
    fn default() -> Self {
        Self::new()
    }
}
