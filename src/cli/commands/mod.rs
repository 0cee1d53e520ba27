pub mod decode;
pub mod derive;
pub mod index_blocks;
pub mod index_tx;
pub mod projects;
pub mod stats;

use crate::chain::EsploraClient;
use crate::config::AppConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::types::AngorNetwork;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

/// Store and chain source settings shared by the online commands
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Database path (overrides config.toml)
    #[arg(long)]
    pub database_path: Option<PathBuf>,

    /// Esplora API base URL (overrides config.toml)
    #[arg(long)]
    pub esplora_url: Option<String>,

    /// Network (overrides config.toml)
    #[arg(long, value_enum)]
    pub network: Option<AngorNetwork>,

    /// Maximum request retries (overrides config.toml)
    #[arg(long)]
    pub max_retries: Option<usize>,

    /// Concurrent request limit (overrides config.toml)
    #[arg(long)]
    pub concurrent_requests: Option<usize>,
}

impl ConnectionArgs {
    /// Configuration from file/environment with CLI arguments applied on top
    pub fn resolve(&self) -> AppConfig {
        let mut config = match AppConfig::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration, using defaults: {}", e);
                AppConfig::get_defaults()
            }
        };

        if let Some(path) = self.database_path.clone() {
            config.database.path = path;
        }
        if let Some(url) = self.esplora_url.clone() {
            config.esplora.url = url;
        }
        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(retries) = self.max_retries {
            config.esplora.max_retries = retries;
        }
        if let Some(concurrent) = self.concurrent_requests {
            config.esplora.concurrent_requests = concurrent;
        }

        info!("Configuration:");
        info!("  Network: {}", config.network);
        info!("  Database: {}", config.database.path.display());
        info!("  Esplora: {}", config.esplora.url);
        config
    }
}

pub fn open_database(config: &AppConfig) -> AppResult<Database> {
    let path = config.database.path.to_str().ok_or_else(|| {
        AppError::Config(format!(
            "Database path is not valid UTF-8: {}",
            config.database.path.display()
        ))
    })?;
    Database::new(path)
}

pub fn connect_chain(config: &AppConfig) -> AppResult<EsploraClient> {
    Ok(EsploraClient::new(config.esplora.clone())?)
}

/// Network from the flag, else from configuration
pub fn resolve_network(network: Option<AngorNetwork>) -> AngorNetwork {
    network.unwrap_or_else(|| AppConfig::get_defaults().network)
}
