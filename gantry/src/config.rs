//! Application configuration.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Application-level settings.
///
/// Defaults are usable without a file; a TOML file overrides field by
/// field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub address: String,
    /// Name of the cookie carrying the session id.
    pub session_cookie: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8080".to_string(),
            session_cookie: "gantry_session".to_string(),
        }
    }
}

/// A failure loading configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
