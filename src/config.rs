//! Configuration for statstore backends.
//!
//! Supports TOML configuration files with serde defaults.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Name of the table/collection the backend binds to.
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "statstore".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            table: default_table(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;

        let config: StoreConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        debug!(table = %config.table, "loaded store configuration");
        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}
