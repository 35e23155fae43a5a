//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::endpoints::{Endpoints, API_URL_ENV, DEFAULT_API_BASE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Resolve the endpoint registry for this base URL
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.base_url.as_str())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Refresh cadence of the dashboard views
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_hospital_refresh")]
    pub hospital_refresh_ms: u64,

    #[serde(default = "default_alert_refresh")]
    pub alert_refresh_ms: u64,

    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,

    #[serde(default = "default_medicine_limit")]
    pub medicine_limit: usize,
}

fn default_hospital_refresh() -> u64 {
    30_000
}

fn default_alert_refresh() -> u64 {
    15_000
}

fn default_search_debounce() -> u64 {
    500
}

fn default_medicine_limit() -> usize {
    20
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            hospital_refresh_ms: default_hospital_refresh(),
            alert_refresh_ms: default_alert_refresh(),
            search_debounce_ms: default_search_debounce(),
            medicine_limit: default_medicine_limit(),
        }
    }
}

impl PollingConfig {
    /// Reject cadences the sync drivers cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hospital_refresh_ms == 0 {
            return Err(ConfigError::Invalid(
                "polling.hospital_refresh_ms must be greater than 0".to_string(),
            ));
        }
        if self.alert_refresh_ms == 0 {
            return Err(ConfigError::Invalid(
                "polling.alert_refresh_ms must be greater than 0".to_string(),
            ));
        }
        if self.medicine_limit == 0 {
            return Err(ConfigError::Invalid(
                "polling.medicine_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn hospital_refresh(&self) -> Duration {
        Duration::from_millis(self.hospital_refresh_ms)
    }

    pub fn alert_refresh(&self) -> Duration {
        Duration::from_millis(self.alert_refresh_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check values that would leave the dashboard unable to poll
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "api.request_timeout_ms must be greater than 0".to_string(),
            ));
        }
        self.polling.validate()
    }

    /// Load from an explicit path, the default locations, or environment
    pub fn load_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_with_env(path);
        }

        let config_paths = [
            dirs::config_dir().map(|p| p.join("carewatch").join("config.toml")),
            Some(PathBuf::from("./carewatch.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        if let Some(ms) = env_parse("CAREWATCH_REQUEST_TIMEOUT_MS") {
            self.api.request_timeout_ms = ms;
        }

        if let Some(ms) = env_parse("CAREWATCH_HOSPITAL_REFRESH_MS") {
            self.polling.hospital_refresh_ms = ms;
        }
        if let Some(ms) = env_parse("CAREWATCH_ALERT_REFRESH_MS") {
            self.polling.alert_refresh_ms = ms;
        }
        if let Some(ms) = env_parse("CAREWATCH_SEARCH_DEBOUNCE_MS") {
            self.polling.search_debounce_ms = ms;
        }

        if let Ok(level) = std::env::var("CAREWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CAREWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Carewatch Configuration
#
# Environment variables override these settings:
# - CAREWATCH_API_URL
# - CAREWATCH_REQUEST_TIMEOUT_MS
# - CAREWATCH_HOSPITAL_REFRESH_MS
# - CAREWATCH_ALERT_REFRESH_MS
# - CAREWATCH_SEARCH_DEBOUNCE_MS
# - CAREWATCH_LOG_LEVEL
# - CAREWATCH_LOG_FORMAT

[api]
# Backend API base URL
base_url = "http://localhost:5000/api"

# Per-request timeout (ms)
request_timeout_ms = 10000

[polling]
# Hospital view refresh interval (ms)
hospital_refresh_ms = 30000

# Alert view refresh interval (ms)
alert_refresh_ms = 15000

# Quiet period after the last search keystroke before fetching (ms)
search_debounce_ms = 500

# Maximum medicines requested per search
medicine_limit = 20

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
