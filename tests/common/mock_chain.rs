//! Scripted chain source

use angor_indexer::chain::{ChainSource, EsploraTransaction, Outspend, TxStatus};
use angor_indexer::errors::{ChainError, ChainResult};
use angor_indexer::types::ChildVout;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct ScriptedChain {
    transactions: HashMap<String, EsploraTransaction>,
    outspends: HashMap<(String, u32), String>,
    raw_transactions: HashMap<String, Vec<u8>>,
    pub requests: AtomicU64,
}

pub fn output(kind: &str, value: u64) -> ChildVout {
    let scriptpubkey = match kind {
        "v1_p2tr" => format!("5120{}", "33".repeat(32)),
        _ => format!("0014{}", "44".repeat(20)),
    };
    ChildVout {
        scriptpubkey,
        scriptpubkey_type: Some(kind.to_string()),
        scriptpubkey_address: None,
        value,
    }
}

impl ScriptedChain {
    pub fn with_transaction(mut self, txid: &str, vout: Vec<ChildVout>, confirmed: bool) -> Self {
        self.transactions.insert(
            txid.to_string(),
            EsploraTransaction {
                txid: txid.to_string(),
                vout,
                status: TxStatus {
                    confirmed,
                    block_height: confirmed.then_some(2540000),
                    block_hash: None,
                },
            },
        );
        self
    }

    pub fn with_raw(mut self, txid: &str, raw: Vec<u8>) -> Self {
        self.raw_transactions.insert(txid.to_string(), raw);
        self
    }

    pub fn with_spend(mut self, txid: &str, vout: u32, spending_txid: &str) -> Self {
        self.outspends
            .insert((txid.to_string(), vout), spending_txid.to_string());
        self
    }

    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    fn count(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}

impl ChainSource for ScriptedChain {
    async fn transaction(&self, txid: &str) -> ChainResult<EsploraTransaction> {
        self.count();
        self.transactions
            .get(txid)
            .cloned()
            .ok_or_else(|| ChainError::NotFound {
                resource: format!("/tx/{}", txid),
            })
    }

    async fn outspend(&self, txid: &str, vout: u32) -> ChainResult<Outspend> {
        self.count();
        Ok(match self.outspends.get(&(txid.to_string(), vout)) {
            Some(spending) => Outspend {
                spent: true,
                txid: Some(spending.clone()),
                vin: Some(0),
                status: None,
            },
            None => Outspend::default(),
        })
    }

    async fn raw_transaction(&self, txid: &str) -> ChainResult<Vec<u8>> {
        self.count();
        self.raw_transactions
            .get(txid)
            .cloned()
            .ok_or_else(|| ChainError::NotFound {
                resource: format!("/tx/{}/hex", txid),
            })
    }

    async fn block_hash(&self, height: u32) -> ChainResult<String> {
        Err(ChainError::NotFound {
            resource: format!("/block-height/{}", height),
        })
    }

    async fn raw_block(&self, block_hash: &str) -> ChainResult<Vec<u8>> {
        Err(ChainError::NotFound {
            resource: format!("/block/{}/raw", block_hash),
        })
    }
}
