//! Common Test Utilities
//!
//! Shared fixtures and helpers for the integration tests.

#![allow(dead_code)]

pub mod mock_chain;

use angor_indexer::database::Database;
use angor_indexer::types::{CreationRecord, InvestmentRecord, PayloadVersion, TransactionStatus};
use bitcoin::consensus::encode::deserialize;
use bitcoin::Transaction;
use tempfile::TempDir;

/// Testnet project creation: V1 payload, founder key 0352eb18...
pub const CREATION_TX: &str = "0100000000010138de40ff6a3d27c33d5b84edf8f35911d819c9c547689cc4da6c5603bc3b26990000000000ffffffff0310270000000000001600144282ccfe323dbba535ccdfc8b66aeeb0bd7dd95b0000000000000000446a210352eb18befb145fef4b5c24513608183d7c3d8004d5fcad9e0e6dc2e89a0af6ae20c749d81fc42037e5b9f7b32ae266cbce75019ce6771be6877d3c509e97e39c14669b052a0100000016001431e5c2bdb361b68eb243ec7dbd46bd7cf71a1d86024730440220075dd33e3809a58423257bf23f5632e305387c283f48dfdce7f355787be33d8002201072fa636fb6bad35ac9d7f8e35fb41eea47de8b38346dc4f123260e9c74c3b401210385143acd30d6d05a5bf35ef1028ce4c50eadffa14670716976007fec5ed3e58500000000";
pub const CREATION_TXID: &str = "00b78119bb6eff9f64b2d29948ddd830f405b18dfdb802a3ec2df4eacfcd1f40";
pub const CREATION_FEE_ADDRESS: &str = "tb1qg2pvel3j8ka62dwvmlytv6hwkz7hmk2m0ncfee";
pub const PROJECT_ID: &str = "angor1qg2pvel3j8ka62dwvmlytv6hwkz7hmk2mms7qll";
pub const FOUNDER_KEY: &str = "0352eb18befb145fef4b5c24513608183d7c3d8004d5fcad9e0e6dc2e89a0af6ae";

/// Testnet investment: 2,000,000 sat fee output, three taproot stage outputs
pub const INVESTMENT_TX: &str = "010000000001017bdbff3cb9461c9d299af512baa2f9c6b0db157376a688ff1b09ae6692d113100200000000ffffffff0680841e0000000000160014060978a8f215edcb42b8a571922e691df2e6905e0000000000000000236a2102e6c8752b2fe17ccda2d77d199bfa0f6c7e5cd5190fb6a93bf10a2f3d67be48cd002d31010000000022512074d1d487eafc15e7237ba317aafd5179933ec8e0b852c0a814e15c9d95310a8a00879303000000002251206a4f6fc475c98868646c8fcee1efb07d9e193a0525daf4ccf001a22a74e9a7c5000e27070000000022512038baa923ce2e6412a90e29cf0989900e003158e181e5dc5a96e36db795888cf8ac48fb1d01000000160014885d29c290b21db178d7778754706bd6030340710248304502210096d00e38fa85c6ea50276354c5d3d10040444cb933eb595341a18d05301582b202205864116b6159140ea0dcf9010b9126bd06bbf7f6f842031a22abbdf450224dc8012103e1bd9cd9175250059f88f0dca122c5ce16a15cefed5019d674a29c31203f53cd00000000";
pub const INVESTMENT_TXID: &str = "d066cdecd4064f368411cf0b0bc8ebbc1265937c78867eebaf44b042ccb691e8";
pub const INVESTMENT_FEE_ADDRESS: &str = "tb1qqcyh328jzhkuks4c54ceytnfrhewdyz7jqfz2a";

pub fn raw(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).unwrap()
}

pub fn transaction(hex_str: &str) -> Transaction {
    deserialize(&raw(hex_str)).unwrap()
}

/// File-backed database in a temporary directory
///
/// The directory must outlive the database, so both are returned.
pub fn temp_database() -> (TempDir, String, Database) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("angor.db").to_str().unwrap().to_string();
    let db = Database::new(&path).unwrap();
    (dir, path, db)
}

/// A confirmed project owning `fee_address`
pub fn project_record(project_id: &str, fee_address: &str) -> CreationRecord {
    CreationRecord {
        project_identifier: project_id.to_string(),
        founder_key_hex: FOUNDER_KEY.to_string(),
        nostr_pub_key: "00".repeat(32),
        payload_version: PayloadVersion::V1,
        fee_address: fee_address.to_string(),
        txid: "ab".repeat(32),
        status: TransactionStatus::Confirmed,
        block_height: Some(1),
        derivation_index: 0,
    }
}

pub fn investment_record(txid: &str, amount_sats: u64, fee_address: &str) -> InvestmentRecord {
    InvestmentRecord {
        transaction_id: txid.to_string(),
        amount_sats,
        fee_address: fee_address.to_string(),
        status: TransactionStatus::Confirmed,
        founder_pub_key: FOUNDER_KEY.to_string(),
        secret_hash: None,
        block_height: Some(2),
    }
}

/// 64-char txid made of one repeated byte
pub fn txid(byte: u8) -> String {
    format!("{:02x}", byte).repeat(32)
}
