//! Telemetry initialisation: structured JSON logs on stdout.
//!
//! # Telemetry invariants
//!
//! - **No payload plaintext or key material** must appear in any log field.
//!   Handlers log error causes and byte counts, never content.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); a set
//!   `RUST_LOG` takes precedence.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber for the gateway.
///
/// # Errors
///
/// Returns an error if a subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
