//! OP_RETURN payload extraction for Angor transactions
//!
//! Creation payloads come in two layouts, told apart by chunk count:
//! - V1: `OP_RETURN <founder key:33> <nostr pubkey:32>`
//! - V2: `OP_RETURN <founder key:33> <key type> <nostr event id:32>`
//!
//! Investment payloads are `OP_RETURN <key:33>` with an optional trailing
//! `<secret hash:32>` for seeders.

use super::error::{DecoderError, DecoderResult, ScriptError};
use super::script::{decompile_expecting, ScriptChunk};
use super::validation::OP_RETURN_OUTPUT_INDEX;
use crate::types::PayloadVersion;
use bitcoin::opcodes::all::OP_RETURN;
use bitcoin::{Script, Transaction};

pub const PUBLIC_KEY_LEN: usize = 33;
pub const NOSTR_FIELD_LEN: usize = 32;
pub const SECRET_HASH_LEN: usize = 32;

const CREATION_V1_CHUNKS: usize = 3;
const CREATION_V2_CHUNKS: usize = 4;
const INVESTMENT_CHUNKS: usize = 2;
const SEEDER_INVESTMENT_CHUNKS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationPayload {
    V1 {
        founder_key: [u8; PUBLIC_KEY_LEN],
        nostr_pub_key: [u8; NOSTR_FIELD_LEN],
    },
    V2 {
        founder_key: [u8; PUBLIC_KEY_LEN],
        /// Kept in ASM form, the chunk may be a small-number opcode
        key_type: String,
        nostr_event_id: [u8; NOSTR_FIELD_LEN],
    },
}

impl CreationPayload {
    pub fn founder_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        match self {
            Self::V1 { founder_key, .. } | Self::V2 { founder_key, .. } => founder_key,
        }
    }

    /// Trailing nostr field: the legacy public key or the event id
    pub fn nostr_field(&self) -> &[u8; NOSTR_FIELD_LEN] {
        match self {
            Self::V1 { nostr_pub_key, .. } => nostr_pub_key,
            Self::V2 { nostr_event_id, .. } => nostr_event_id,
        }
    }

    pub fn version(&self) -> PayloadVersion {
        match self {
            Self::V1 { .. } => PayloadVersion::V1,
            Self::V2 { .. } => PayloadVersion::V2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentPayload {
    pub founder_key: [u8; PUBLIC_KEY_LEN],
    pub secret_hash: Option<[u8; SECRET_HASH_LEN]>,
}

/// Script of the OP_RETURN output
pub fn op_return_script(tx: &Transaction) -> DecoderResult<&Script> {
    tx.output
        .get(OP_RETURN_OUTPUT_INDEX)
        .map(|output| output.script_pubkey.as_script())
        .ok_or(DecoderError::MissingOutput {
            index: OP_RETURN_OUTPUT_INDEX,
        })
}

pub fn extract_creation_payload(tx: &Transaction) -> DecoderResult<CreationPayload> {
    Ok(parse_creation_script(op_return_script(tx)?)?)
}

pub fn extract_investment_payload(tx: &Transaction) -> DecoderResult<InvestmentPayload> {
    Ok(parse_investment_script(op_return_script(tx)?)?)
}

pub fn parse_creation_script(script: &Script) -> Result<CreationPayload, ScriptError> {
    let chunks = decompile_expecting(script, &[CREATION_V1_CHUNKS, CREATION_V2_CHUNKS])?;
    check_marker(&chunks)?;

    let founder_key = fixed_chunk::<PUBLIC_KEY_LEN>(&chunks, 1)?;

    if chunks.len() == CREATION_V1_CHUNKS {
        Ok(CreationPayload::V1 {
            founder_key,
            nostr_pub_key: fixed_chunk::<NOSTR_FIELD_LEN>(&chunks, 2)?,
        })
    } else {
        Ok(CreationPayload::V2 {
            founder_key,
            key_type: chunks[2].to_string(),
            nostr_event_id: fixed_chunk::<NOSTR_FIELD_LEN>(&chunks, 3)?,
        })
    }
}

pub fn parse_investment_script(script: &Script) -> Result<InvestmentPayload, ScriptError> {
    let chunks = decompile_expecting(script, &[INVESTMENT_CHUNKS, SEEDER_INVESTMENT_CHUNKS])?;
    check_marker(&chunks)?;

    let founder_key = fixed_chunk::<PUBLIC_KEY_LEN>(&chunks, 1)?;
    let secret_hash = if chunks.len() == SEEDER_INVESTMENT_CHUNKS {
        Some(fixed_chunk::<SECRET_HASH_LEN>(&chunks, 2)?)
    } else {
        None
    };

    Ok(InvestmentPayload {
        founder_key,
        secret_hash,
    })
}

fn check_marker(chunks: &[ScriptChunk]) -> Result<(), ScriptError> {
    match chunks.first() {
        Some(chunk) if chunk.is_op(OP_RETURN) => Ok(()),
        Some(chunk) => Err(ScriptError::WrongFirstChunk {
            found: chunk.to_string(),
        }),
        None => Err(ScriptError::WrongFirstChunk {
            found: String::new(),
        }),
    }
}

fn fixed_chunk<const N: usize>(
    chunks: &[ScriptChunk],
    position: usize,
) -> Result<[u8; N], ScriptError> {
    let data = chunks.get(position).map(ScriptChunk::data).unwrap_or(&[]);

    data.try_into().map_err(|_| ScriptError::WrongChunkLength {
        position,
        expected: N,
        found: data.len(),
    })
}
