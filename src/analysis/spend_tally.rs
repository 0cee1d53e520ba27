//! Spend tally over investment outputs
//!
//! Spent taproot outputs are grouped by the transaction that spent them. A
//! group with a single output is an ordinary spend (founder claim or investor
//! refund); several outputs of one investment converging into the same
//! transaction is a penalty settlement.

use crate::types::{AdvancedProjectStats, AngorVout, StatsTally};
use std::collections::BTreeMap;

/// The last output of an investment spent by a transaction with more than one
/// output of its own is a founder claim
pub fn is_spent_by_founder(vout: &AngorVout) -> bool {
    vout.is_last
        && vout
            .child_vouts
            .as_ref()
            .is_some_and(|children| children.len() > 1)
}

fn tally_key(vout: &AngorVout, spending_tx_id: &str) -> String {
    if is_spent_by_founder(vout) {
        format!("{}-{}-{}", vout.investment_tx_id, vout.value, spending_tx_id)
    } else {
        format!("{}-{}", vout.investment_tx_id, spending_tx_id)
    }
}

/// Accumulate spent outputs of every investment into a tally keyed by
/// investment and spending transaction
///
/// Unspent outputs and outputs without a known spending transaction are
/// skipped.
pub fn compute_stats_tally(investments: &[Vec<AngorVout>]) -> BTreeMap<String, StatsTally> {
    let mut tally: BTreeMap<String, StatsTally> = BTreeMap::new();

    for vout in investments.iter().flatten() {
        let spending_tx_id = match (&vout.spending_tx_id, vout.spent) {
            (Some(id), true) => id,
            _ => continue,
        };

        let entry = tally.entry(tally_key(vout, spending_tx_id)).or_default();
        entry.total_amount += vout.value;
        entry.number_of_tx += 1;
    }

    tally
}

/// Reduce a tally into founder spend and penalty totals
pub fn compute_advanced_stats(tally: &BTreeMap<String, StatsTally>) -> AdvancedProjectStats {
    tally
        .values()
        .fold(AdvancedProjectStats::default(), |mut stats, entry| {
            match entry.number_of_tx {
                0 => {}
                1 => stats.amount_spent_so_far_by_founder += entry.total_amount,
                _ => {
                    stats.amount_in_penalties += entry.total_amount;
                    stats.count_in_penalties += 1;
                }
            }
            stats
        })
}
