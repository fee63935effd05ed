use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::artifacts::ArtifactPaths;
use crate::infrastructure::session::SessionRegistryConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub artifacts: ArtifactsConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

/// Where the pre-fitted artifacts live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub dir: PathBuf,
    pub regressor: String,
    pub encoder: String,
    pub transformers: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds without a request before a session is torn down
    pub idle_timeout_secs: u64,
    pub max_sessions: u64,
    pub cookie_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
            regressor: "xgb_model.json".to_string(),
            encoder: "ordinal_encoder.json".to_string(),
            transformers: "power_transformers.json".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 30 * 60,
            max_sessions: 10_000,
            cookie_name: "diamond_session".to_string(),
        }
    }
}

impl ArtifactsConfig {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.dir, &self.regressor, &self.encoder, &self.transformers)
    }
}

impl SessionConfig {
    pub fn registry_config(&self) -> SessionRegistryConfig {
        SessionRegistryConfig {
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            max_sessions: self.max_sessions,
        }
    }
}

impl AppConfig {
    /// Layered load: `config/default`, `config/local`, then `APP__*` env vars
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
