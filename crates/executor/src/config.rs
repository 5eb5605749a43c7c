//! Configuration via `warehaus.toml`
//!
//! A single flat file next to the deployment. `write_default_if_missing`
//! drops a commented template on first start; edit it and restart to
//! change settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use warehaus_core::{Error, Result};
use warehaus_engine::Settings;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "warehaus.toml";

/// Configuration loaded from `warehaus.toml`.
///
/// # Example
///
/// ```toml
/// log_filter = "info,warehaus::dispatch=debug"
/// heartbeat_timeout_secs = 90
/// record_events = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehausConfig {
    /// `tracing` filter directive, `RUST_LOG` syntax
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Seconds without a heartbeat before a server counts as stale
    #[serde(default = "default_heartbeat_timeout_secs")]
    pub heartbeat_timeout_secs: u64,
    /// Persist and publish tree events
    #[serde(default = "default_record_events")]
    pub record_events: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_heartbeat_timeout_secs() -> u64 {
    90
}

fn default_record_events() -> bool {
    true
}

impl Default for WarehausConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            heartbeat_timeout_secs: default_heartbeat_timeout_secs(),
            record_events: default_record_events(),
        }
    }
}

impl WarehausConfig {
    /// Check values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the heartbeat timeout is zero or the log filter
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.heartbeat_timeout_secs == 0 {
            return Err(Error::Config {
                reason: "heartbeat_timeout_secs in warehaus.toml must be greater than 0".into(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(Error::Config {
                reason: "log_filter in warehaus.toml must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Engine settings derived from this config.
    pub fn settings(&self) -> Settings {
        Settings {
            heartbeat_timeout: Duration::from_secs(self.heartbeat_timeout_secs),
            record_events: self.record_events,
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Warehaus configuration
#
# Log filter in RUST_LOG syntax (default: "info")
#   e.g. "info,warehaus::dispatch=debug"
log_filter = "info"

# Seconds without a heartbeat before a server is reported stale (default: 90)
heartbeat_timeout_secs = 90

# Persist an event for every lab, type and object change (default: true)
record_events = true
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        let config: WarehausConfig = toml::from_str(&content).map_err(|e| Error::Config {
            reason: format!("Failed to parse config file '{}': {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Config {
                reason: format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config {
            reason: format!("Failed to serialize config: {}", e),
        })?;
        std::fs::write(path, content).map_err(|e| Error::Config {
            reason: format!("Failed to write config file '{}': {}", path.display(), e),
        })
    }
}
