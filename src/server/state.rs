//! Dev Backend State

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use super::alerts::AlertCache;

pub const HOST_ENV: &str = "CAREWATCH_HOST";
pub const PORT_ENV: &str = "CAREWATCH_PORT";

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Alerts raised so far
    pub alerts: Arc<RwLock<AlertCache>>,
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            alerts: Arc::new(RwLock::new(AlertCache::new())),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Dev backend configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Default `limit` for `/medicines`
    pub default_medicine_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            default_medicine_limit: 20,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Defaults overridden by `CAREWATCH_HOST` / `CAREWATCH_PORT`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = std::env::var(PORT_ENV).ok().and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        config
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
