//! Spend classification types
//!
//! `AngorVout` values are rebuilt from chain data on every stats request and
//! never persisted.

use serde::{Deserialize, Serialize};

/// Output of the transaction that spent an investment's last taproot output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildVout {
    pub scriptpubkey: String,
    #[serde(default)]
    pub scriptpubkey_type: Option<String>,
    #[serde(default)]
    pub scriptpubkey_address: Option<String>,
    pub value: u64,
}

/// A spent taproot output of an investment transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngorVout {
    pub value: u64,
    pub spent: bool,
    pub spending_tx_id: Option<String>,
    pub investment_tx_id: String,
    /// Last taproot output considered for this investment
    pub is_last: bool,
    pub child_vouts: Option<Vec<ChildVout>>,
}

/// Aggregate of the outputs sharing one tally key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsTally {
    pub total_amount: u64,
    pub number_of_tx: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedProjectStats {
    pub amount_spent_so_far_by_founder: u64,
    pub amount_in_penalties: u64,
    pub count_in_penalties: u64,
}

/// Investor count and invested amount as recorded by the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTotals {
    pub investor_count: u64,
    pub amount_invested: u64,
}

/// Full project statistics response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub investor_count: u64,
    pub amount_invested: u64,
    pub amount_spent_so_far_by_founder: u64,
    pub amount_in_penalties: u64,
    pub count_in_penalties: u64,
}

impl ProjectStats {
    pub fn new(totals: InvestmentTotals, advanced: AdvancedProjectStats) -> Self {
        Self {
            investor_count: totals.investor_count,
            amount_invested: totals.amount_invested,
            amount_spent_so_far_by_founder: advanced.amount_spent_so_far_by_founder,
            amount_in_penalties: advanced.amount_in_penalties,
            count_in_penalties: advanced.count_in_penalties,
        }
    }
}
