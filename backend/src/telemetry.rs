//! Structured logging setup shared by both service binaries.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the JSON log subscriber, filtered by `RUST_LOG`.
///
/// A second installation attempt is logged and otherwise ignored, so tests
/// and binaries may call this freely.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
