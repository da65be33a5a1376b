// ============================================================
// APPLICATION CONFIGURATION
// ============================================================
// Defaults <- harmonizer.toml <- HARMONIZER_* environment

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::metrics_config::MetricsConfig;

pub const CONFIG_FILE: &str = "harmonizer.toml";
pub const ENV_PREFIX: &str = "HARMONIZER_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for JSON request bodies (whole sheets are posted at once)
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            max_body_bytes: 32 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,

    /// `tracing_subscriber` filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,

    pub metrics: MetricsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log_filter: "info".to_string(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.server.max_body_bytes == 0 {
            return Err(AppError::ValidationError(
                "server.max_body_bytes must be > 0".to_string(),
            ));
        }
        self.metrics
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid metrics config: {}", e)))
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

/// Layered configuration sources, lowest precedence first
pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load and validate the application configuration
pub fn load_config() -> Result<AppConfig> {
    let config: AppConfig = figment().extract()?;
    config.validate()?;
    Ok(config)
}
