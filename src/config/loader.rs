use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::domain::City;

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
    /// Uses `~/.config/six-cities/config.toml` on Linux, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is known.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("six-cities").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
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
    /// - At least one city is configured and the default city is among them
    /// - Rating labels are present
    /// - The base URL is http(s) and timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cities.is_empty() {
            return Err(validation("At least one city must be configured"));
        }

        if City::find(&self.cities, &self.ui.default_city).is_none() {
            return Err(validation(format!(
                "Default city '{}' not found in configured cities",
                self.ui.default_city
            )));
        }

        if self.ratings.is_empty() {
            return Err(validation("At least one rating label must be configured"));
        }

        let base_url = &self.api.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(validation(format!(
                "Base URL '{base_url}' must start with http:// or https://"
            )));
        }

        if self.api.request_timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(validation("Timeouts must be greater than zero"));
        }

        if self.ui.tick_rate_ms == 0 {
            return Err(validation("Tick rate must be greater than zero"));
        }

        Ok(())
    }

    /// The configured default city. Valid configs always have one.
    pub fn default_city(&self) -> Option<&City> {
        City::find(&self.cities, &self.ui.default_city).or_else(|| self.cities.first())
    }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
