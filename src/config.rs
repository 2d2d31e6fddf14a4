//! Server configuration.
//!
//! Settings come from an optional TOML file overlaid with `DEEPSOURCE_*`
//! environment variables (`DEEPSOURCE_API_KEY` being the one required
//! value: a DeepSource personal access token).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default GraphQL endpoint for the DeepSource API.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepsource.io/graphql/";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("DEEPSOURCE_API_KEY is not set; create a personal access token in the DeepSource dashboard")]
    MissingApiKey,
}

/// Runtime configuration for the DeepSource client.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepSourceConfig {
    /// DeepSource personal access token.
    #[serde(default)]
    pub api_key: String,
    /// GraphQL endpoint.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl DeepSourceConfig {
    /// Load configuration from an optional TOML file plus the environment.
    ///
    /// Environment variables win over the file; the file is optional when
    /// no explicit path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("deepsource-mcp").required(false)),
        };

        let settings: DeepSourceConfig = builder
            .add_source(Environment::with_prefix("DEEPSOURCE"))
            .build()?
            .try_deserialize()?;

        if settings.api_key.trim().is_empty() {
            return Err(ConfigLoadError::MissingApiKey);
        }
        Ok(settings)
    }

    /// Construct a configuration from explicit values (used in tests).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
