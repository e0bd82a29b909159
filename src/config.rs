//! Application configuration
//!
//! Configuration is plain JSON. Every field has a default, so an empty object
//! is a valid config.

use app_state::NavigationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

use crate::logging::DEFAULT_LOG_FILTER;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or unknown values
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Navigation controller settings
    pub navigation: NavigationConfig,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }
}
