//! Observable rate lookup for presentation code.
//!
//! A `RateLookup` keeps a synchronously readable `{rate, loading, error}`
//! view in sync with an asynchronous fetch for whichever currency pair
//! was requested last. Consumers observe it through a `watch` channel;
//! dropping the receiver ends delivery.

use crate::core::currency::{CurrencyCode, RateProvider};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// The binding's reported state.
///
/// `rate` is always a usable number: `1.0` while loading and after a
/// failed fetch, so dependent price computations degrade to "no
/// conversion" instead of propagating garbage.
#[derive(Debug, Clone, PartialEq)]
pub struct RateState {
    pub rate: f64,
    pub loading: bool,
    pub error: Option<String>,
}

impl RateState {
    fn identity() -> Self {
        RateState {
            rate: 1.0,
            loading: false,
            error: None,
        }
    }
}

pub struct RateLookup {
    provider: Arc<dyn RateProvider>,
    tx: Arc<watch::Sender<RateState>>,
    seq: Arc<AtomicU64>,
}

impl RateLookup {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        let (tx, _rx) = watch::channel(RateState::identity());
        RateLookup {
            provider,
            tx: Arc::new(tx),
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> RateState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state updates. Dropping the receiver is the only
    /// teardown a consumer needs.
    pub fn subscribe(&self) -> watch::Receiver<RateState> {
        self.tx.subscribe()
    }

    /// Point the binding at a new pair.
    ///
    /// An identity pair resolves synchronously to rate `1` with no
    /// loading transition and no network access. Any other pair reports
    /// `loading` immediately and resolves through the provider (which
    /// consults the rate cache first). A fetch still in flight for a
    /// previously requested pair keeps running but its result is
    /// discarded: only the latest request may write the final state.
    pub fn request(&self, from: CurrencyCode, to: CurrencyCode) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if from == to {
            self.tx.send_replace(RateState::identity());
            return;
        }

        self.tx.send_replace(RateState {
            rate: 1.0,
            loading: true,
            error: None,
        });

        let provider = Arc::clone(&self.provider);
        let tx = Arc::clone(&self.tx);
        let latest = Arc::clone(&self.seq);
        tokio::spawn(async move {
            let next = match provider.get_rate(from, to).await {
                Ok(rate) => RateState {
                    rate,
                    loading: false,
                    error: None,
                },
                Err(e) => RateState {
                    rate: 1.0,
                    loading: false,
                    error: Some(e.to_string()),
                },
            };
            // The sequence check runs inside the channel's send lock, so
            // a stale resolution can never clobber a newer request's
            // state.
            tx.send_if_modified(|state| {
                if latest.load(Ordering::SeqCst) != seq {
                    return false;
                }
                *state = next;
                true
            });
        });
    }

    /// Detach any in-flight fetch without issuing a new request. The
    /// network call runs to completion but its result is a no-op.
    pub fn cancel(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::RateUnavailable;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::time::sleep;

    struct MockRateProvider {
        // (rate, artificial latency) per pair; absent pairs fail.
        rates: HashMap<(CurrencyCode, CurrencyCode), (f64, Duration)>,
        calls: Arc<AtomicUsize>,
    }

    impl MockRateProvider {
        fn new() -> Self {
            MockRateProvider {
                rates: HashMap::new(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn with_rate(
            mut self,
            from: CurrencyCode,
            to: CurrencyCode,
            rate: f64,
            delay: Duration,
        ) -> Self {
            self.rates.insert((from, to), (rate, delay));
            self
        }
    }

    #[async_trait]
    impl RateProvider for MockRateProvider {
        async fn get_rate(
            &self,
            from: CurrencyCode,
            to: CurrencyCode,
        ) -> Result<f64, RateUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.rates.get(&(from, to)) {
                Some((rate, delay)) => {
                    sleep(*delay).await;
                    Ok(*rate)
                }
                None => Err(RateUnavailable(format!(
                    "no rate for {from}->{to}"
                ))),
            }
        }
    }

    #[tokio::test]
    async fn test_identity_pair_resolves_without_loading() {
        let provider = MockRateProvider::new();
        let calls = Arc::clone(&provider.calls);
        let lookup = RateLookup::new(Arc::new(provider));

        lookup.request(CurrencyCode::Usd, CurrencyCode::Usd);

        let state = lookup.state();
        assert_eq!(state.rate, 1.0);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_settles_to_fetched_rate() {
        let provider = MockRateProvider::new().with_rate(
            CurrencyCode::Usd,
            CurrencyCode::Eur,
            0.92,
            Duration::from_millis(5),
        );
        let lookup = RateLookup::new(Arc::new(provider));
        let mut rx = lookup.subscribe();

        lookup.request(CurrencyCode::Usd, CurrencyCode::Eur);

        // Loading state is reported before the fetch resolves.
        let interim = lookup.state();
        assert!(interim.loading);
        assert_eq!(interim.rate, 1.0);

        let settled = rx
            .wait_for(|state| !state.loading)
            .await
            .unwrap()
            .clone();
        assert_eq!(settled.rate, 0.92);
        assert!(settled.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_identity_rate() {
        let provider = MockRateProvider::new();
        let lookup = RateLookup::new(Arc::new(provider));
        let mut rx = lookup.subscribe();

        lookup.request(CurrencyCode::Usd, CurrencyCode::Eur);

        let settled = rx
            .wait_for(|state| !state.loading)
            .await
            .unwrap()
            .clone();
        assert_eq!(settled.rate, 1.0);
        let message = settled.error.expect("error should be captured");
        assert!(message.contains("rate unavailable"));
    }

    #[tokio::test]
    async fn test_stale_resolution_never_overwrites_newer_request() {
        let provider = MockRateProvider::new()
            .with_rate(
                CurrencyCode::Usd,
                CurrencyCode::Eur,
                0.92,
                Duration::from_millis(80),
            )
            .with_rate(
                CurrencyCode::Usd,
                CurrencyCode::Gbp,
                0.79,
                Duration::from_millis(5),
            );
        let lookup = RateLookup::new(Arc::new(provider));

        lookup.request(CurrencyCode::Usd, CurrencyCode::Eur);
        lookup.request(CurrencyCode::Usd, CurrencyCode::Gbp);

        // Wait until well past the slower (abandoned) fetch.
        sleep(Duration::from_millis(150)).await;

        let state = lookup.state();
        assert_eq!(state.rate, 0.79);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight_result() {
        let provider = MockRateProvider::new().with_rate(
            CurrencyCode::Usd,
            CurrencyCode::Eur,
            0.92,
            Duration::from_millis(20),
        );
        let lookup = RateLookup::new(Arc::new(provider));

        lookup.request(CurrencyCode::Usd, CurrencyCode::Eur);
        lookup.cancel();

        sleep(Duration::from_millis(60)).await;

        // The fetch completed but its result was discarded.
        let state = lookup.state();
        assert_eq!(state.rate, 1.0);
        assert!(state.loading);
    }
}
