//! Store abstraction used by the indexer and the stats engine

use crate::errors::AppResult;
use crate::types::{CreationRecord, InvestmentRecord, InvestmentTotals, TransactionStatus};

/// Persistence of decoded Angor projects and investments
///
/// Projects are keyed by project identifier and investments by txid; both
/// writes are upserts so the same transaction can be indexed repeatedly as its
/// status moves from pending to confirmed.
pub trait AngorStore {
    /// Insert a project, or update status and block height of an existing one
    fn set_project(&mut self, project: &CreationRecord) -> AppResult<()>;

    /// Upsert a project and, once it is confirmed, confirm every investment
    /// paying its fee address; both writes commit together or not at all.
    /// Returns the number of investments changed.
    fn record_creation(&mut self, project: &CreationRecord) -> AppResult<usize>;

    fn get_project(&self, project_id: &str) -> AppResult<Option<CreationRecord>>;

    /// Project whose creation transaction paid the fee output to `fee_address`
    fn get_project_by_fee_address(&self, fee_address: &str)
        -> AppResult<Option<CreationRecord>>;

    /// Projects ordered by creation block, newest first
    fn get_projects(&self, limit: usize, offset: usize) -> AppResult<Vec<CreationRecord>>;

    /// Insert an investment, or update the status of an existing one
    fn set_investment(&mut self, investment: &InvestmentRecord) -> AppResult<()>;

    /// Set the status of every investment paying `fee_address`; returns rows changed
    fn update_investments_status(
        &mut self,
        fee_address: &str,
        status: TransactionStatus,
    ) -> AppResult<usize>;

    fn get_project_investments(&self, project_id: &str) -> AppResult<Vec<InvestmentRecord>>;

    fn confirmed_projects_count(&self) -> AppResult<u64>;

    fn confirmed_investments_count(&self) -> AppResult<u64>;

    /// Investor count and amount invested over confirmed investments
    fn project_investment_totals(&self, project_id: &str) -> AppResult<InvestmentTotals>;

    fn mark_block_indexed(&mut self, height: u32, block_hash: &str) -> AppResult<()>;

    fn is_block_indexed(&self, height: u32) -> AppResult<bool>;
}
