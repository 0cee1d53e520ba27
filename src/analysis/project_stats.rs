//! Full statistics for one project

use crate::analysis::{collect_angor_vouts, compute_advanced_stats, compute_stats_tally};
use crate::chain::ChainSource;
use crate::database::AngorStore;
use crate::errors::AppResult;
use crate::types::{ProjectStats, TransactionStatus};
use tracing::info;

/// Combine stored investment totals with spend classification from the chain
///
/// Returns `None` for an unknown project. A project without confirmed
/// investments, or whose spend data cannot be fetched, gets zeroed spend stats.
pub async fn project_stats<S, C>(
    store: &S,
    source: &C,
    project_id: &str,
) -> AppResult<Option<ProjectStats>>
where
    S: AngorStore,
    C: ChainSource,
{
    if store.get_project(project_id)?.is_none() {
        return Ok(None);
    }

    let totals = store.project_investment_totals(project_id)?;
    let investment_txids: Vec<String> = store
        .get_project_investments(project_id)?
        .into_iter()
        .filter(|investment| investment.status == TransactionStatus::Confirmed)
        .map(|investment| investment.transaction_id)
        .collect();

    let vouts = collect_angor_vouts(source, &investment_txids).await;
    let tally = compute_stats_tally(&vouts);
    let advanced = compute_advanced_stats(&tally);

    info!(
        "Project {}: {} investments, {} tally entries, {} penalties",
        project_id,
        investment_txids.len(),
        tally.len(),
        advanced.count_in_penalties
    );

    Ok(Some(ProjectStats::new(totals, advanced)))
}
