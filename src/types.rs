//! Angor Indexer - Type System
//!
//! - `network`: Supported networks and their Angor root keys
//! - `status`: Transaction status tags shared by projects and investments
//! - `records`: Normalised creation/investment records handed to the store
//! - `stats`: Spend tally inputs and project statistics

mod network;
mod records;
mod stats;
mod status;

pub use network::AngorNetwork;
pub use records::{CreationRecord, InvestmentRecord, PayloadVersion};
pub use stats::{AdvancedProjectStats, AngorVout, ChildVout, InvestmentTotals, ProjectStats, StatsTally};
pub use status::TransactionStatus;
