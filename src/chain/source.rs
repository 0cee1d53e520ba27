//! Chain source abstraction
//!
//! Response types follow the Esplora REST API (`/tx/:txid`,
//! `/tx/:txid/outspend/:vout`), which mempool.space and blockstream.info both
//! serve.

#![allow(async_fn_in_trait)]

use crate::errors::ChainResult;
use crate::types::ChildVout;
use serde::{Deserialize, Serialize};

/// Confirmation status of a transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    pub confirmed: bool,
    #[serde(default)]
    pub block_height: Option<u32>,
    #[serde(default)]
    pub block_hash: Option<String>,
}

/// Transaction as returned by `/tx/:txid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsploraTransaction {
    pub txid: String,
    pub vout: Vec<ChildVout>,
    #[serde(default)]
    pub status: TxStatus,
}

/// Spend status of one output as returned by `/tx/:txid/outspend/:vout`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outspend {
    pub spent: bool,
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub vin: Option<u32>,
    #[serde(default)]
    pub status: Option<TxStatus>,
}

/// Blockchain data needed by the indexer and the stats engine
pub trait ChainSource {
    /// Decoded transaction with its outputs and confirmation status
    async fn transaction(&self, txid: &str) -> ChainResult<EsploraTransaction>;

    /// Spend status of `txid:vout`
    async fn outspend(&self, txid: &str, vout: u32) -> ChainResult<Outspend>;

    /// Consensus-serialised transaction bytes
    async fn raw_transaction(&self, txid: &str) -> ChainResult<Vec<u8>>;

    /// Hash of the block at `height` on the best chain
    async fn block_hash(&self, height: u32) -> ChainResult<String>;

    /// Consensus-serialised block bytes
    async fn raw_block(&self, block_hash: &str) -> ChainResult<Vec<u8>>;
}
