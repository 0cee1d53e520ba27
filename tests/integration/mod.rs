//! Integration Tests Module
//!
//! End-to-end tests across the decoder, indexer, store and stats engine.

pub mod cli_smoke_test;
pub mod indexing_pipeline;
pub mod project_stats;
