//! Normalised Angor records
//!
//! These are the values produced by the transaction classifier and persisted by
//! the store. Keys and hashes are carried as lowercase hex strings.

use super::TransactionStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// OP_RETURN layout of a project creation transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadVersion {
    /// `OP_RETURN <founder key> <nostr pubkey>`
    V1,
    /// `OP_RETURN <founder key> <key type> <nostr event id>`
    V2,
}

impl PayloadVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl FromStr for PayloadVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            other => Err(format!("Unknown payload version: {}", other)),
        }
    }
}

/// Decoded project creation transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationRecord {
    pub project_identifier: String,
    pub founder_key_hex: String,
    /// Legacy nostr public key (V1) or nostr event id (V2)
    pub nostr_pub_key: String,
    pub payload_version: PayloadVersion,
    pub fee_address: String,
    pub txid: String,
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u32>,
    pub derivation_index: u32,
}

/// Decoded investment transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    pub transaction_id: String,
    pub amount_sats: u64,
    pub fee_address: String,
    pub status: TransactionStatus,
    /// Key carried in the investment OP_RETURN payload
    pub founder_pub_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u32>,
}

impl InvestmentRecord {
    /// Investors who reveal a secret hash are seeders
    pub fn is_seeder(&self) -> bool {
        self.secret_hash.is_some()
    }
}
