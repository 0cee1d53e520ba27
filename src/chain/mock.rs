//! In-memory chain source for unit tests

use super::{ChainSource, EsploraTransaction, Outspend, TxStatus};
use crate::errors::{ChainError, ChainResult};
use crate::types::ChildVout;
use std::collections::HashMap;

#[derive(Default)]
pub struct MockChain {
    pub transactions: HashMap<String, EsploraTransaction>,
    pub outspends: HashMap<(String, u32), Outspend>,
    pub raw_transactions: HashMap<String, Vec<u8>>,
    pub block_hashes: HashMap<u32, String>,
    pub raw_blocks: HashMap<String, Vec<u8>>,
}

pub fn taproot_vout(value: u64) -> ChildVout {
    ChildVout {
        scriptpubkey: format!("5120{}", "11".repeat(32)),
        scriptpubkey_type: Some("v1_p2tr".to_string()),
        scriptpubkey_address: None,
        value,
    }
}

pub fn wpkh_vout(value: u64) -> ChildVout {
    ChildVout {
        scriptpubkey: format!("0014{}", "22".repeat(20)),
        scriptpubkey_type: Some("v0_p2wpkh".to_string()),
        scriptpubkey_address: None,
        value,
    }
}

impl MockChain {
    pub fn add_transaction(&mut self, txid: &str, vout: Vec<ChildVout>) {
        self.transactions.insert(
            txid.to_string(),
            EsploraTransaction {
                txid: txid.to_string(),
                vout,
                status: TxStatus {
                    confirmed: true,
                    block_height: Some(100),
                    block_hash: None,
                },
            },
        );
    }

    pub fn add_spend(&mut self, txid: &str, vout: u32, spending_txid: &str) {
        self.outspends.insert(
            (txid.to_string(), vout),
            Outspend {
                spent: true,
                txid: Some(spending_txid.to_string()),
                vin: Some(vout),
                status: None,
            },
        );
    }
}

fn not_found(resource: String) -> ChainError {
    ChainError::NotFound { resource }
}

impl ChainSource for MockChain {
    async fn transaction(&self, txid: &str) -> ChainResult<EsploraTransaction> {
        self.transactions
            .get(txid)
            .cloned()
            .ok_or_else(|| not_found(format!("/tx/{}", txid)))
    }

    async fn outspend(&self, txid: &str, vout: u32) -> ChainResult<Outspend> {
        match self.outspends.get(&(txid.to_string(), vout)) {
            Some(outspend) => Ok(outspend.clone()),
            None if self.transactions.contains_key(txid) => Ok(Outspend::default()),
            None => Err(not_found(format!("/tx/{}/outspend/{}", txid, vout))),
        }
    }

    async fn raw_transaction(&self, txid: &str) -> ChainResult<Vec<u8>> {
        self.raw_transactions
            .get(txid)
            .cloned()
            .ok_or_else(|| not_found(format!("/tx/{}/hex", txid)))
    }

    async fn block_hash(&self, height: u32) -> ChainResult<String> {
        self.block_hashes
            .get(&height)
            .cloned()
            .ok_or_else(|| not_found(format!("/block-height/{}", height)))
    }

    async fn raw_block(&self, block_hash: &str) -> ChainResult<Vec<u8>> {
        self.raw_blocks
            .get(block_hash)
            .cloned()
            .ok_or_else(|| not_found(format!("/block/{}/raw", block_hash)))
    }
}
