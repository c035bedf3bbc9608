//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `pvedash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use pvedash_app::DashboardConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Management backend the dashboard talks to.
    pub backend: BackendConfig,
    /// Refresh timing.
    pub dashboard: DashboardSection,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Management backend configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend serving `/api/*`.
    pub url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Dashboard timing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Wait after a successful action before refreshing, in milliseconds.
    pub settle_delay_ms: u64,
    /// Steps of a fast-refresh countdown (one per second).
    pub fast_refresh_steps: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `pvedash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("pvedash.toml")?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("PVEDASH_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("PVEDASH_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("PVEDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("PVEDASH_BACKEND_URL") {
            self.backend.url = val;
        }
        if let Some(val) = var("PVEDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "backend url must not be empty".to_string(),
            ));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "backend timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Settings for the backend HTTP client.
    #[must_use]
    pub fn backend_client(&self) -> pvedash_adapter_http_reqwest::Config {
        pvedash_adapter_http_reqwest::Config {
            base_url: self.backend.url.clone(),
            timeout: Duration::from_secs(self.backend.timeout_secs),
        }
    }

    /// Timing knobs for the dashboard controller.
    #[must_use]
    pub fn dashboard(&self) -> DashboardConfig {
        DashboardConfig {
            settle_delay: Duration::from_millis(self.dashboard.settle_delay_ms),
            fast_refresh_steps: self.dashboard.fast_refresh_steps,
            ..DashboardConfig::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8920".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1_000,
            fast_refresh_steps: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pvedashd=info,pvedash=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
