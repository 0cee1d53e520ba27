use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Chain data source operations
    #[error("Chain source error: {0}")]
    Chain(#[from] ChainError),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Angor transaction decoding
    #[error("Decoder error: {0}")]
    Decoder(#[from] crate::decoder::DecoderError),
}

/// Chain data source error types
#[derive(Error, Debug)]
pub enum ChainError {
    /// Failed to reach the chain data source
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TXID string format is invalid (not valid hex or wrong length)
    #[error("Invalid txid: {txid}")]
    InvalidTxid { txid: String },

    /// Request failed (network errors, unexpected status codes, etc.)
    #[error("Request failed: {endpoint} - {message}")]
    CallFailed { endpoint: String, message: String },

    /// Failed to deserialise response data
    #[error("Deserialisation failed: {0}")]
    DeserialisationFailed(String),

    /// Retry limit exceeded for an operation
    #[error("Max retries exceeded: {operation}")]
    MaxRetriesExceeded { operation: String },

    /// Request timed out
    #[error("Request timeout: {timeout_seconds}s for {operation}")]
    Timeout {
        timeout_seconds: u64,
        operation: String,
    },

    /// Transaction or block unknown to the data source
    #[error("Not found: {resource}")]
    NotFound { resource: String },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for chain source operations
pub type ChainResult<T> = Result<T, ChainError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<hex::FromHexError> for AppError {
    fn from(err: hex::FromHexError) -> Self {
        AppError::InvalidData(format!("Hex error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
