//! Chain data source integration
//!
//! This module provides everything the indexer needs from the blockchain:
//! - **Source** - `ChainSource` trait and Esplora response types
//! - **Client** - Async Esplora REST client with bounded concurrency and retry
//! - **Cache** - Transaction cache for repeated spending-transaction lookups
//! - **Retry** - Exponential backoff and timeout helpers

pub mod cache;
pub mod client;
#[cfg(test)]
pub(crate) mod mock;
pub mod retry;
pub mod source;

// Re-export main types
pub use cache::{CacheStats, TransactionCache};
pub use client::EsploraClient;
pub use retry::{calculate_next_backoff, execute_with_timeout};
pub use source::{ChainSource, EsploraTransaction, Outspend, TxStatus};
