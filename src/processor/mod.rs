//! Indexing of Angor transactions into the store
//!
//! `AngorIndexer` drives the decoder over single transactions, whole blocks
//! and block ranges fetched from a chain source.

pub mod indexer;

pub use indexer::{AngorIndexer, IndexOutcome, IndexingStats};
