//! Raw TOML configuration data types

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("remote.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("remote.timeout_seconds cannot be 0")]
    ZeroTimeout,
}

/// Raw remote backend configuration from TOML (`[remote]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRemoteConfig {
    /// Base URL of the remote actor
    pub base_url: String,
    /// Per-request timeout in seconds (no timeout when unset)
    pub timeout_seconds: Option<u64>,
}

impl Default for FileRemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_seconds: None,
        }
    }
}

/// Raw console configuration from TOML (`[console]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsoleConfig {
    /// Use the in-process offline actor instead of the HTTP backend
    pub offline: bool,
    /// Print operation status transitions as they happen
    pub show_status_lines: bool,
}

impl Default for FileConsoleConfig {
    fn default() -> Self {
        Self {
            offline: false,
            show_status_lines: true,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub remote: FileRemoteConfig,
    pub console: FileConsoleConfig,
}

impl FileConfig {
    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.remote.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.remote.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::ZeroTimeout);
        }
        Ok(())
    }

    /// The configured per-request timeout, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        self.remote.timeout_seconds.map(Duration::from_secs)
    }
}
