//! Logging bootstrap.

use tracing_subscriber::EnvFilter;
use warehaus_core::{Error, Result};

/// Install a global `fmt` subscriber filtered by `filter`.
///
/// Returns `Ok(true)` if this call installed the subscriber and `Ok(false)`
/// if one was already installed, so embedding applications and tests can
/// call it freely.
///
/// # Errors
///
/// Returns `Config` if `filter` is not a valid directive.
pub fn init_logging(filter: &str) -> Result<bool> {
    let filter = EnvFilter::try_new(filter).map_err(|e| Error::Config {
        reason: format!("Invalid log filter '{}': {}", filter, e),
    })?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok())
}
