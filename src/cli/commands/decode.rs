use super::resolve_network;
use crate::decoder::{classify_creation, classify_investment};
use crate::errors::AppResult;
use crate::types::{AngorNetwork, TransactionStatus};
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransactionKind {
    Creation,
    Investment,
}

/// Decode a raw Angor transaction offline and print the record as JSON
#[derive(Args)]
pub struct DecodeCommand {
    /// Raw transaction hex
    pub raw_tx: String,

    /// Network used for address rendering and project derivation (overrides config.toml)
    #[arg(long, value_enum)]
    pub network: Option<AngorNetwork>,

    /// Transaction kind to decode as
    #[arg(long, value_enum, default_value = "creation")]
    pub kind: TransactionKind,
}

impl DecodeCommand {
    pub fn run(&self) -> AppResult<()> {
        let network = resolve_network(self.network);
        let raw_tx = hex::decode(self.raw_tx.trim())?;

        let json = match self.kind {
            TransactionKind::Creation => serde_json::to_string_pretty(&classify_creation(
                &raw_tx,
                network,
                TransactionStatus::NotIdentified,
                None,
            )?)?,
            TransactionKind::Investment => serde_json::to_string_pretty(&classify_investment(
                &raw_tx,
                network,
                TransactionStatus::NotIdentified,
                None,
            )?)?,
        };

        println!("{}", json);
        Ok(())
    }
}
