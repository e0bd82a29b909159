//! Logging bootstrap

use tracing_subscriber::EnvFilter;

/// Fallback directive when the configured one does not parse
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global `tracing` subscriber
///
/// The filter comes from configuration, not from the environment. Calling
/// this more than once keeps the first subscriber.
pub fn init_logging(filter: &str) {
    let filter =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
