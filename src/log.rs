// Logging initialization for the server binary.
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Server logs keep timestamps; one line per event.
    tracing_subscriber::registry()
        .with(fmt::layer().compact())
        .with(filter)
        .init();
}
