//! Shared infrastructure for the courier integration.
//!
//! - `ProviderEnvironment`: production/sandbox endpoint selection
//! - `ExponentialBackoff`: retry pacing for the transport layer
//! - `init_logging`: process-wide structured logging setup

mod backoff;
mod environment;

pub use backoff::ExponentialBackoff;
pub use environment::{ParseEnvironmentError, ProviderEnvironment};

/// Initialize process-wide structured logging.
///
/// Respects `RUST_LOG`; defaults to `info` when unset.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
