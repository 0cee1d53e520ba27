//! Angor transaction decoder
//!
//! Turns raw project creation and investment transactions into normalised
//! records:
//! - **validation** - input/output cardinality checks per transaction kind
//! - **script** - OP_RETURN decompilation into chunks
//! - **payload** - creation (V1/V2) and investment payload layouts
//! - **derivation** - founder key to project identifier pipeline
//!
//! Decoding is pure. Persisting the records is left to
//! [`crate::processor::AngorIndexer`].

pub mod derivation;
pub mod error;
pub mod payload;
pub mod script;
pub mod validation;

pub use derivation::{derive_project_id, ProjectIdDerivation};
pub use error::{DecoderError, DecoderResult, ScriptError};
pub use payload::{CreationPayload, InvestmentPayload};

use crate::types::{AngorNetwork, CreationRecord, InvestmentRecord, TransactionStatus};
use bitcoin::{Address, Transaction};
use tracing::debug;
use validation::FEE_OUTPUT_INDEX;

/// Decode a raw project creation transaction
pub fn classify_creation(
    raw_tx: &[u8],
    network: AngorNetwork,
    status: TransactionStatus,
    block_height: Option<u32>,
) -> DecoderResult<CreationRecord> {
    let tx = validation::parse_transaction(raw_tx)?;
    decode_creation(&tx, network, status, block_height)
}

/// Decode a raw investment transaction
///
/// The result is only an investment once a project with the same fee address
/// is known; that lookup happens in the indexer.
pub fn classify_investment(
    raw_tx: &[u8],
    network: AngorNetwork,
    status: TransactionStatus,
    block_height: Option<u32>,
) -> DecoderResult<InvestmentRecord> {
    let tx = validation::parse_transaction(raw_tx)?;
    decode_investment(&tx, network, status, block_height)
}

pub fn decode_creation(
    tx: &Transaction,
    network: AngorNetwork,
    status: TransactionStatus,
    block_height: Option<u32>,
) -> DecoderResult<CreationRecord> {
    validation::validate_creation_shape(tx)?;

    let payload = payload::extract_creation_payload(tx)?;
    let derivation = derive_project_id(payload.founder_key(), network)?;
    validation::validate_creation_fee_output(
        tx,
        &derivation.angor_key_hash,
        &derivation.project_id,
    )?;
    let fee_address = fee_address(tx, network)?;
    let txid = tx.compute_txid().to_string();

    debug!(
        "Decoded project creation {}: project {} (index {})",
        txid, derivation.project_id, derivation.derivation_index
    );

    Ok(CreationRecord {
        founder_key_hex: derivation.founder_key_hex(),
        project_identifier: derivation.project_id,
        nostr_pub_key: hex::encode(payload.nostr_field()),
        payload_version: payload.version(),
        fee_address,
        txid,
        status,
        block_height,
        derivation_index: derivation.derivation_index,
    })
}

pub fn decode_investment(
    tx: &Transaction,
    network: AngorNetwork,
    status: TransactionStatus,
    block_height: Option<u32>,
) -> DecoderResult<InvestmentRecord> {
    validation::validate_investment_shape(tx)?;

    let payload = payload::extract_investment_payload(tx)?;
    let fee_address = fee_address(tx, network)?;
    let transaction_id = tx.compute_txid().to_string();

    debug!(
        "Decoded investment candidate {} paying fee to {}",
        transaction_id, fee_address
    );

    Ok(InvestmentRecord {
        transaction_id,
        amount_sats: tx.output[FEE_OUTPUT_INDEX].value.to_sat(),
        fee_address,
        status,
        founder_pub_key: hex::encode(payload.founder_key),
        secret_hash: payload.secret_hash.map(hex::encode),
        block_height,
    })
}

/// Address paid by the fee output
pub fn fee_address(tx: &Transaction, network: AngorNetwork) -> DecoderResult<String> {
    let output = tx
        .output
        .get(FEE_OUTPUT_INDEX)
        .ok_or(DecoderError::MissingOutput {
            index: FEE_OUTPUT_INDEX,
        })?;

    Address::from_script(&output.script_pubkey, network.bitcoin_network())
        .map(|address| address.to_string())
        .map_err(|e| DecoderError::AddressExtraction(e.to_string()))
}
