//! Logging initialization

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DEFAULT_LOG_FILTER;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `filter`; an invalid directive falls back
/// to [`DEFAULT_LOG_FILTER`]. Calling this twice leaves the first subscriber
/// in place.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
    {
        eprintln!("Warning: logging already initialized: {}", e);
        return;
    }

    tracing::info!(filter = %filter, "Logging initialized");
}
