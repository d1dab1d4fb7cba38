//! Configuration management for the Cafe Ledger client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CAFE_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use shared::types::Language;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Business API configuration
    pub api: ApiConfig,

    /// Login credentials for the dashboard session
    pub auth: AuthConfig,

    /// CSV export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Dashboard display language
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the business API, e.g. http://localhost:4000/api
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExportConfig {
    /// Directory to write CSV exports into; exports are skipped when unset
    pub dir: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CAFE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:4000/api")?
            .set_default("api.timeout_seconds", 30)?
            .set_default("auth.email", "")?
            .set_default("auth.password", "")?
            .set_default("language", "en")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CAFE_ prefix)
            .add_source(
                Environment::with_prefix("CAFE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            timeout_seconds: 30,
        }
    }
}
