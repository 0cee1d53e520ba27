use crate::types::AngorNetwork;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub network: AngorNetwork,
    pub database: DatabaseConfig,
    pub esplora: EsploraConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

/// Esplora REST API configuration used for spend lookups and block indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsploraConfig {
    pub url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
    pub concurrent_requests: usize,
}

impl Default for EsploraConfig {
    fn default() -> Self {
        Self {
            url: "https://mempool.space/testnet/api".to_string(),
            timeout_seconds: 30,
            max_retries: 5,
            initial_backoff_ms: 200,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 30,
            concurrent_requests: 8,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = EsploraConfig::default();
        let config = Config::builder()
            .set_default("network", "testnet")?
            .set_default("database.path", "./angor.db")?
            .set_default("esplora.url", defaults.url)?
            .set_default("esplora.timeout_seconds", defaults.timeout_seconds)?
            .set_default("esplora.max_retries", defaults.max_retries as i64)?
            .set_default("esplora.initial_backoff_ms", defaults.initial_backoff_ms)?
            .set_default("esplora.backoff_multiplier", defaults.backoff_multiplier)?
            .set_default("esplora.max_backoff_seconds", defaults.max_backoff_seconds)?
            .set_default(
                "esplora.concurrent_requests",
                defaults.concurrent_requests as i64,
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // ANGOR_ESPLORA__URL style overrides for nested keys
            .add_source(config::Environment::with_prefix("ANGOR").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Flat names for the settings people actually change
        if let Ok(db_path) = env::var("ANGOR_DATABASE_PATH") {
            app_config.database.path = PathBuf::from(db_path);
        }

        if let Ok(url) = env::var("ANGOR_ESPLORA_URL") {
            app_config.esplora.url = url;
        }

        if let Ok(network) = env::var("ANGOR_NETWORK") {
            app_config.network = network
                .parse()
                .map_err(|e: String| ConfigError::Message(e))?;
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Self {
        Self::load().unwrap_or_else(|_| Self {
            network: AngorNetwork::Testnet,
            database: DatabaseConfig {
                path: PathBuf::from("./angor.db"),
            },
            esplora: EsploraConfig::default(),
        })
    }
}
