use chrono::format::{Item, StrftimeItems};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/salesdesk/config.toml` on Unix, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("salesdesk").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields `Config::default()`; an existing file must
    /// parse as TOML and pass validation.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `api.base_url` is an absolute http(s) URL
    /// - `api.path_prefix` is empty or starts with `/`
    /// - timeouts and the tick rate are non-zero
    /// - `ui.date_format` is a valid chrono pattern
    /// - `server.bind_addr` parses as a socket address
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api.base_url).map_err(|e| invalid(format!(
            "api.base_url '{}' is not a valid URL: {}",
            self.api.base_url, e
        )))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if !self.api.path_prefix.is_empty() && !self.api.path_prefix.starts_with('/') {
            return Err(invalid(format!(
                "api.path_prefix '{}' must start with '/'",
                self.api.path_prefix
            )));
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(invalid("api timeouts must be greater than zero".to_string()));
        }

        if self.ui.tick_rate_ms == 0 {
            return Err(invalid("ui.tick_rate_ms must be greater than zero".to_string()));
        }

        if StrftimeItems::new(&self.ui.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid(format!(
                "ui.date_format '{}' is not a valid chrono format",
                self.ui.date_format
            )));
        }

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(invalid(format!(
                "server.bind_addr '{}' is not a socket address",
                self.server.bind_addr
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}
