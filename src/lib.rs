//! Angor crowdfunding transaction indexer
//!
//! Decodes Angor project creation and investment transactions, derives
//! project identifiers, stores the results and classifies how investment
//! funds were later spent.

pub mod analysis;
pub mod chain;
pub mod cli;
pub mod config;
pub mod database;
pub mod decoder;
pub mod errors;
pub mod processor;
pub mod types;
