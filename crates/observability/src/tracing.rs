//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize the process-wide subscriber.
///
/// Filtering defaults to `info` and is overridable via `RUST_LOG` (agent
/// publish/reserve traffic logs at `debug`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
