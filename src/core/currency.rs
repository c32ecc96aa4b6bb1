//! Currency codes and the rate-conversion seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The fixed set of currencies the shop can display prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Inr,
    Eur,
    Gbp,
}

/// Ordered (source, target) pair used as a rate-cache key.
pub type CurrencyPair = (CurrencyCode, CurrencyCode);

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 4] = [
        CurrencyCode::Usd,
        CurrencyCode::Inr,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Inr => "INR",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
        }
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(CurrencyCode::Usd),
            "INR" => Ok(CurrencyCode::Inr),
            "EUR" => Ok(CurrencyCode::Eur),
            "GBP" => Ok(CurrencyCode::Gbp),
            _ => Err(anyhow::anyhow!("Unsupported currency code: {}", s)),
        }
    }
}

/// The external rate source could not produce a rate for the requested
/// pair: the request failed, returned a non-success status, or the
/// response omitted the target currency.
#[derive(Debug, Clone)]
pub struct RateUnavailable(pub String);

impl Display for RateUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rate unavailable: {}", self.0)
    }
}

impl std::error::Error for RateUnavailable {}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Multiplicative factor converting one unit of `from` into `to`.
    async fn get_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<f64, RateUnavailable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_round_trip() {
        for code in CurrencyCode::ALL {
            assert_eq!(code.as_str().parse::<CurrencyCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_currency_code_parse_is_case_insensitive() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!("Inr".parse::<CurrencyCode>().unwrap(), CurrencyCode::Inr);
    }

    #[test]
    fn test_unknown_currency_code_is_rejected() {
        assert!("JPY".parse::<CurrencyCode>().is_err());
        assert!("".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_currency_code_serializes_as_uppercase() {
        assert_eq!(
            serde_json::to_string(&CurrencyCode::Gbp).unwrap(),
            "\"GBP\""
        );
        let parsed: CurrencyCode = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, CurrencyCode::Eur);
    }
}
