//! Decoder-specific error types
//!
//! Every variant is terminal for the transaction being decoded.

/// Result type for decoder operations
pub type DecoderResult<T> = Result<T, DecoderError>;

/// Decoder-specific error types
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Transaction object wasn't created: {0}")]
    MissingTransaction(String),

    #[error("Transaction object has invalid amount of inputs: {found}")]
    InvalidInputCount { found: usize },

    #[error("Transaction object has invalid amount of outputs: expected {expected}, found {found}")]
    InvalidOutputCount { expected: String, found: usize },

    #[error("Transaction has no output at index {index}")]
    MissingOutput { index: usize },

    #[error(transparent)]
    ScriptDecompilation(#[from] ScriptError),

    #[error("Retention is too large. The max number is 2^31 (2,147,483,648), got {retention}")]
    RetentionOverflow { retention: u64 },

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Cannot extract address from fee output: {0}")]
    AddressExtraction(String),

    #[error("Fee output does not pay project {project_id}: found script {found}")]
    FeeOutputMismatch { project_id: String, found: String },

    #[error("Project identifier encoding failed: {0}")]
    Encoding(String),
}

/// Reasons an OP_RETURN script is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("Script decompilation failed. {0}")]
    Unparsable(String),

    #[error("Script decompilation failed. Wrong chunk amount: expected {expected}, found {found}")]
    WrongChunkCount { expected: String, found: usize },

    #[error("Script decompilation failed. Wrong first chunk: {found}")]
    WrongFirstChunk { found: String },

    #[error(
        "Script decompilation failed. Wrong {} chunk: expected {expected} bytes, found {found}",
        ordinal(.position)
    )]
    WrongChunkLength {
        /// Zero-based chunk index, the marker being chunk 0
        position: usize,
        expected: usize,
        found: usize,
    },
}

fn ordinal(position: &usize) -> String {
    match position + 1 {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        4 => "fourth".to_string(),
        n => format!("#{}", n),
    }
}
