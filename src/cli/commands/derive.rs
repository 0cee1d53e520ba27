use super::resolve_network;
use crate::decoder::derive_project_id;
use crate::errors::{AppError, AppResult};
use crate::types::AngorNetwork;
use clap::Args;
use tracing::info;

/// Derive the project identifier of a founder key
#[derive(Args)]
pub struct DeriveCommand {
    /// Compressed founder public key (33 bytes, hex)
    pub founder_key: String,

    /// Network whose Angor root key is used (overrides config.toml)
    #[arg(long, value_enum)]
    pub network: Option<AngorNetwork>,
}

impl DeriveCommand {
    pub fn run(&self) -> AppResult<()> {
        let network = resolve_network(self.network);
        let founder_key = hex::decode(self.founder_key.trim())?;
        if founder_key.len() != 33 {
            return Err(AppError::InvalidData(format!(
                "Founder key must be 33 bytes, got {}",
                founder_key.len()
            )));
        }

        info!("Deriving project identifier on {}", network);
        let derivation = derive_project_id(&founder_key, network)?;

        println!("Network:            {}", network);
        println!("Founder key:        {}", derivation.founder_key_hex());
        println!("Founder key hash:   {}", derivation.founder_key_hash_hex());
        println!("Hash int:           {}", derivation.founder_key_hash_int);
        println!("Derivation index:   {}", derivation.derivation_index);
        println!("Project identifier: {}", derivation.project_id);
        Ok(())
    }
}
