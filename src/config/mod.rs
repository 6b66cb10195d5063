use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod web_log;

pub use web_log::{DetailLevel, LogConfig, DEFAULT_MAX_BODY_BYTES};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid value for {name}: {source}")]
    InvalidOverride {
        name: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub metrics: MetricsConfig,
    pub app: AppSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9090,
        }
    }
}

/// The `app` tree. Only `app.logging.web` is read by this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub web: LogConfig,
}

impl AppConfig {
    /// Loads the YAML file named by `CONFIG_PATH` (optional), then `APP_*`
    /// environment variables, then the `HOST`/`PORT`/`METRICS_PORT` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(app_environment());

        if let Ok(host) = std::env::var("HOST") {
            builder = builder.set_override("server.host", host)?;
        }
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", parse_port("PORT", &port)?)?;
        }
        if let Ok(metrics_port) = std::env::var("METRICS_PORT") {
            builder =
                builder.set_override("metrics.port", parse_port("METRICS_PORT", &metrics_port)?)?;
        }

        Self::build(builder)
    }

    /// Builds configuration from inline YAML alone.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml));
        Self::build(builder)
    }

    pub fn web_log(&self) -> &LogConfig {
        &self.app.logging.web
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// `APP_LOGGING_WEB_ENABLED` binds to `app.logging.web.enabled`.
fn app_environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .separator("_")
        .keep_prefix(true)
}

fn parse_port(name: &'static str, value: &str) -> Result<i64, ConfigError> {
    value
        .parse::<u16>()
        .map(i64::from)
        .map_err(|source| ConfigError::InvalidOverride { name, source })
}
