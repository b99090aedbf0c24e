//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Backend-as-a-service configuration.
    pub backend: BackendConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Backend-as-a-service connection configuration.
///
/// All persistence and identity is delegated to an external document
/// store / auth service reached over HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend API.
    pub endpoint: String,
    /// Project identifier sent with every request.
    pub project_id: String,
    /// Database identifier holding the survey collections.
    pub database_id: String,
    /// Collection holding survey documents.
    #[serde(default = "default_surveys_collection")]
    pub surveys_collection: String,
    /// Collection holding response documents.
    #[serde(default = "default_responses_collection")]
    pub responses_collection: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_surveys_collection() -> String {
    "surveys".to_string()
}

fn default_responses_collection() -> String {
    "responses".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `FORMPULSE_ENV`)
    /// 3. Environment variables with `FORMPULSE_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("FORMPULSE_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FORMPULSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("FORMPULSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
