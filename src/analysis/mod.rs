//! Investment spend analysis
//!
//! - **Spend collection** - fetches spend status of investment taproot outputs
//! - **Spend tally** - groups spent outputs and splits founder spend from penalties
//! - **Project stats** - joins the tally with stored investment totals

pub mod project_stats;
pub mod spend_collection;
pub mod spend_tally;

pub use project_stats::project_stats;
pub use spend_collection::{collect_angor_vouts, is_taproot};
pub use spend_tally::{compute_advanced_stats, compute_stats_tally, is_spent_by_founder};
