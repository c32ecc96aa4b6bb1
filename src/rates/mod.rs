//! Exchange-rate cache and the observable lookup binding.

pub mod lookup;
pub mod store;

pub use lookup::{RateLookup, RateState};
pub use store::{DEFAULT_RATE_TTL, RateStore};
