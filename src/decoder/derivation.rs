//! Project identifier derivation
//!
//! Founder key → double SHA-256 (byte-reversed) → low 32 bits → halved into a
//! BIP32 child index → child of the network's Angor root key →
//! HASH160 → bech32 with the `angor` prefix and witness version 0.
//!
//! The same HASH160 is the witness program of the project's fee output.
//!
//! Every stage is a pure function of the previous stage's output, so the same
//! founder key and network always produce the same identifier.

use super::error::{DecoderError, DecoderResult};
use crate::types::AngorNetwork;
use bitcoin::bech32::{segwit, Hrp};
use bitcoin::bip32::{ChildNumber, Xpub};
use bitcoin::hashes::{hash160, sha256d, Hash};
use bitcoin::secp256k1::{PublicKey, Secp256k1};
use std::str::FromStr;

/// Human-readable part of every project identifier
pub const PROJECT_ID_HRP: &str = "angor";

/// Largest derivation index accepted before derivation is attempted
pub const MAX_RETENTION: u64 = 1 << 31;

/// Byte offset of the low 32 bits in the reversed key hash
const HASH_INT_OFFSET: usize = 28;

/// Intermediate and final values of one derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdDerivation {
    /// Founder key in canonical compressed form
    pub founder_key: PublicKey,
    pub founder_key_hash: [u8; 32],
    pub founder_key_hash_int: u64,
    pub derivation_index: u32,
    /// HASH160 of the derived Angor key
    pub angor_key_hash: [u8; 20],
    pub project_id: String,
}

impl ProjectIdDerivation {
    pub fn founder_key_hex(&self) -> String {
        hex::encode(self.founder_key.serialize())
    }

    pub fn founder_key_hash_hex(&self) -> String {
        hex::encode(self.founder_key_hash)
    }
}

/// Derive the project identifier for a founder key on a network
pub fn derive_project_id(
    founder_key: &[u8],
    network: AngorNetwork,
) -> DecoderResult<ProjectIdDerivation> {
    derive_project_id_with(founder_key, network, |hash| u64::from(hash_to_int(hash)))
}

/// Derivation with a substitutable hash-to-integer stage
pub fn derive_project_id_with<F>(
    founder_key: &[u8],
    network: AngorNetwork,
    to_int: F,
) -> DecoderResult<ProjectIdDerivation>
where
    F: Fn(&[u8; 32]) -> u64,
{
    let founder_key = normalise_founder_key(founder_key)?;
    let founder_key_hash = founder_key_hash(&founder_key);
    let hash_int = to_int(&founder_key_hash);
    let derivation_index = derivation_index(hash_int)?;
    let angor_key = derive_angor_key(network, derivation_index)?;
    let angor_key_hash = angor_key_hash(&angor_key);
    let project_id = encode_project_id(&angor_key_hash)?;

    Ok(ProjectIdDerivation {
        founder_key,
        founder_key_hash,
        founder_key_hash_int: hash_int,
        derivation_index,
        angor_key_hash,
        project_id,
    })
}

/// Validate a compressed founder key against the curve
pub fn normalise_founder_key(bytes: &[u8]) -> DecoderResult<PublicKey> {
    PublicKey::from_slice(bytes).map_err(|e| DecoderError::InvalidPublicKey(e.to_string()))
}

/// SHA-256(SHA-256(key)) in reversed byte order
pub fn founder_key_hash(key: &PublicKey) -> [u8; 32] {
    let mut hash = sha256d::Hash::hash(&key.serialize()).to_byte_array();
    hash.reverse();
    hash
}

/// Low 32 bits of the key hash, read big-endian at offset 28
pub fn hash_to_int(hash: &[u8; 32]) -> u32 {
    let mut low = [0u8; 4];
    low.copy_from_slice(&hash[HASH_INT_OFFSET..]);
    u32::from_be_bytes(low)
}

/// Halve the hash integer into the 31-bit BIP32 non-hardened range
pub fn derivation_index(hash_int: u64) -> DecoderResult<u32> {
    let retention = hash_int / 2;

    if retention > MAX_RETENTION {
        return Err(DecoderError::RetentionOverflow { retention });
    }

    u32::try_from(retention).map_err(|_| DecoderError::RetentionOverflow { retention })
}

/// Non-hardened child of the network's Angor root key
pub fn derive_angor_key(network: AngorNetwork, index: u32) -> DecoderResult<PublicKey> {
    let root = Xpub::from_str(network.root_key())
        .map_err(|e| DecoderError::KeyDerivation(e.to_string()))?;
    let child_number = ChildNumber::from_normal_idx(index)
        .map_err(|e| DecoderError::KeyDerivation(e.to_string()))?;

    let secp = Secp256k1::verification_only();
    let child = root
        .ckd_pub(&secp, child_number)
        .map_err(|e| DecoderError::KeyDerivation(e.to_string()))?;

    Ok(child.public_key)
}

pub fn angor_key_hash(angor_key: &PublicKey) -> [u8; 20] {
    hash160::Hash::hash(&angor_key.serialize()).to_byte_array()
}

/// Bech32 `angor1q...` identifier of a derived Angor key hash
pub fn encode_project_id(angor_key_hash: &[u8; 20]) -> DecoderResult<String> {
    let hrp = Hrp::parse(PROJECT_ID_HRP).map_err(|e| DecoderError::Encoding(e.to_string()))?;
    segwit::encode(hrp, segwit::VERSION_0, angor_key_hash)
        .map_err(|e| DecoderError::Encoding(e.to_string()))
}
