//! Exchange-rate quotes from the Frankfurter API.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::{CurrencyCode, RateProvider, RateUnavailable};
use crate::rates::store::{DEFAULT_RATE_TTL, RateStore};

/// Rate provider backed by the public Frankfurter quote endpoint.
///
/// Successful fetches land in the shared [`RateStore`] with the
/// configured TTL; a fresh cached rate short-circuits the network
/// entirely. Failed fetches are surfaced to the caller without retry.
pub struct FrankfurterProvider {
    base_url: String,
    store: Arc<RateStore>,
    ttl: Duration,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, store: Arc<RateStore>) -> Self {
        FrankfurterProvider {
            base_url: base_url.to_string(),
            store,
            ttl: DEFAULT_RATE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(
        name = "FrankfurterRateFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn get_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<f64, RateUnavailable> {
        // Identity pairs never touch the network and are never cached.
        if from == to {
            return Ok(1.0);
        }

        let pair = (from, to);
        if let Some(rate) = self.store.get(&pair).await {
            return Ok(rate);
        }

        let url = format!("{}/latest?from={from}&to={to}", self.base_url);
        debug!("Requesting exchange rate from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("vibe-commerce/0.1")
            .build()
            .map_err(|e| RateUnavailable(format!("client error: {e}")))?;

        let response = client.get(&url).send().await.map_err(|e| {
            RateUnavailable(format!("request error: {e} for pair: {from}->{to}"))
        })?;

        if !response.status().is_success() {
            return Err(RateUnavailable(format!(
                "HTTP error: {} for pair: {from}->{to}",
                response.status()
            )));
        }

        let text = response.text().await.map_err(|e| {
            RateUnavailable(format!("read error: {e} for pair: {from}->{to}"))
        })?;

        let data: FrankfurterResponse = serde_json::from_str(&text).map_err(|e| {
            RateUnavailable(format!(
                "failed to parse response for {from}->{to}: {e}"
            ))
        })?;

        let rate = data
            .rates
            .get(to.as_str())
            .copied()
            .ok_or_else(|| {
                RateUnavailable(format!("no rate for {from}->{to} in response"))
            })?;

        if rate <= 0.0 {
            return Err(RateUnavailable(format!(
                "non-positive rate {rate} for pair: {from}->{to}"
            )));
        }

        self.store.put(pair, rate, self.ttl).await;
        Ok(rate)
    }
}
