//! Transaction shape checks
//!
//! Pure precondition checks run before any payload parsing.

use super::error::{DecoderError, DecoderResult};
use bitcoin::consensus::encode;
use bitcoin::hashes::Hash;
use bitcoin::{ScriptBuf, Transaction, WPubkeyHash};

/// Fee output, OP_RETURN metadata output and change output
pub const CREATION_OUTPUT_COUNT: usize = 3;

/// Index of the fee output in both transaction kinds
pub const FEE_OUTPUT_INDEX: usize = 0;

/// Index of the OP_RETURN output in both transaction kinds
pub const OP_RETURN_OUTPUT_INDEX: usize = 1;

/// Parse raw transaction bytes
pub fn parse_transaction(raw: &[u8]) -> DecoderResult<Transaction> {
    if raw.is_empty() {
        return Err(DecoderError::MissingTransaction(
            "no transaction bytes".to_string(),
        ));
    }

    encode::deserialize(raw).map_err(|e| DecoderError::MissingTransaction(e.to_string()))
}

/// Project creation: at least one input and exactly three outputs
pub fn validate_creation_shape(tx: &Transaction) -> DecoderResult<()> {
    if tx.input.is_empty() {
        return Err(DecoderError::InvalidInputCount { found: 0 });
    }

    if tx.output.len() != CREATION_OUTPUT_COUNT {
        return Err(DecoderError::InvalidOutputCount {
            expected: CREATION_OUTPUT_COUNT.to_string(),
            found: tx.output.len(),
        });
    }

    Ok(())
}

/// The fee output of a creation must pay P2WPKH to the derived Angor key
///
/// Seeder investments share the creation layout; this is what tells them apart.
pub fn validate_creation_fee_output(
    tx: &Transaction,
    angor_key_hash: &[u8; 20],
    project_id: &str,
) -> DecoderResult<()> {
    let output = tx
        .output
        .get(FEE_OUTPUT_INDEX)
        .ok_or(DecoderError::MissingOutput {
            index: FEE_OUTPUT_INDEX,
        })?;

    let expected = ScriptBuf::new_p2wpkh(&WPubkeyHash::from_byte_array(*angor_key_hash));
    if output.script_pubkey != expected {
        return Err(DecoderError::FeeOutputMismatch {
            project_id: project_id.to_string(),
            found: output.script_pubkey.to_hex_string(),
        });
    }

    Ok(())
}

/// Investment: at least the fee output
pub fn validate_investment_shape(tx: &Transaction) -> DecoderResult<()> {
    if tx.output.is_empty() {
        return Err(DecoderError::InvalidOutputCount {
            expected: "at least 1".to_string(),
            found: 0,
        });
    }

    Ok(())
}
