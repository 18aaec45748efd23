//! Configuration file loading for sentiment-console
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./sentiment.toml` or `./.sentiment.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/sentiment-console/config.toml`
//! 4. Fallback: `~/.config/sentiment-console/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileConsoleConfig, FileRemoteConfig};
pub use loader::ConfigLoader;
