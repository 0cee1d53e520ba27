use crate::chain::ChainSource;
use crate::database::AngorStore;
use crate::decoder::{self, validation};
use crate::errors::{AppError, AppResult};
use crate::types::{AngorNetwork, CreationRecord, InvestmentRecord, TransactionStatus};
use bitcoin::consensus::encode::deserialize;
use bitcoin::{Block, Transaction};
use tracing::{debug, info, warn};

/// What a transaction turned out to be once indexed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    Creation(CreationRecord),
    Investment(InvestmentRecord),
    /// Not decodable as either kind, or an investment for an unknown project
    NotAngor,
}

/// Counters for one indexed block or block range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexingStats {
    pub blocks_indexed: u64,
    pub blocks_skipped: u64,
    pub transactions_seen: u64,
    pub projects_found: u64,
    pub investments_found: u64,
}

impl IndexingStats {
    fn record(&mut self, outcome: &IndexOutcome) {
        self.transactions_seen += 1;
        match outcome {
            IndexOutcome::Creation(_) => self.projects_found += 1,
            IndexOutcome::Investment(_) => self.investments_found += 1,
            IndexOutcome::NotAngor => {}
        }
    }

    fn merge(&mut self, other: IndexingStats) {
        self.blocks_indexed += other.blocks_indexed;
        self.blocks_skipped += other.blocks_skipped;
        self.transactions_seen += other.transactions_seen;
        self.projects_found += other.projects_found;
        self.investments_found += other.investments_found;
    }
}

/// Runs the creation and investment flows against a store
pub struct AngorIndexer<S: AngorStore> {
    store: S,
    network: AngorNetwork,
}

impl<S: AngorStore> AngorIndexer<S> {
    pub fn new(store: S, network: AngorNetwork) -> Self {
        Self { store, network }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn network(&self) -> AngorNetwork {
        self.network
    }

    /// Decode and upsert a project creation transaction
    ///
    /// A confirmed creation confirms every investment already recorded against
    /// the same fee address.
    pub fn process_creation(
        &mut self,
        tx: &Transaction,
        status: TransactionStatus,
        block_height: Option<u32>,
    ) -> AppResult<CreationRecord> {
        let record = decoder::decode_creation(tx, self.network, status, block_height)?;

        let updated = self.store.record_creation(&record)?;
        if updated > 0 {
            debug!(
                "Confirmed {} investments of project {}",
                updated, record.project_identifier
            );
        }

        info!(
            "Indexed project {} from {} ({})",
            record.project_identifier, record.txid, record.status
        );
        Ok(record)
    }

    /// Decode and upsert an investment transaction
    ///
    /// Returns `None` without touching the store when no project uses the
    /// transaction's fee address.
    pub fn process_investment(
        &mut self,
        tx: &Transaction,
        status: TransactionStatus,
        block_height: Option<u32>,
    ) -> AppResult<Option<InvestmentRecord>> {
        let record = decoder::decode_investment(tx, self.network, status, block_height)?;

        let project = match self.store.get_project_by_fee_address(&record.fee_address)? {
            Some(project) => project,
            None => {
                debug!(
                    "No project for fee address {}, {} is not an investment",
                    record.fee_address, record.transaction_id
                );
                return Ok(None);
            }
        };

        self.store.set_investment(&record)?;
        info!(
            "Indexed investment {} of {} sats in project {}",
            record.transaction_id, record.amount_sats, project.project_identifier
        );
        Ok(Some(record))
    }

    /// Try the creation flow, then the investment flow
    ///
    /// Decoding failures mean "not an Angor transaction"; store failures are
    /// returned.
    pub fn index_transaction(
        &mut self,
        tx: &Transaction,
        status: TransactionStatus,
        block_height: Option<u32>,
    ) -> AppResult<IndexOutcome> {
        match self.process_creation(tx, status, block_height) {
            Ok(record) => return Ok(IndexOutcome::Creation(record)),
            Err(AppError::Decoder(e)) => {
                debug!("{} is not a project creation: {}", tx.compute_txid(), e);
            }
            Err(e) => return Err(e),
        }

        match self.process_investment(tx, status, block_height) {
            Ok(Some(record)) => Ok(IndexOutcome::Investment(record)),
            Ok(None) => Ok(IndexOutcome::NotAngor),
            Err(AppError::Decoder(e)) => {
                debug!("{} is not an investment: {}", tx.compute_txid(), e);
                Ok(IndexOutcome::NotAngor)
            }
            Err(e) => Err(e),
        }
    }

    pub fn index_raw_transaction(
        &mut self,
        raw_tx: &[u8],
        status: TransactionStatus,
        block_height: Option<u32>,
    ) -> AppResult<IndexOutcome> {
        let tx = validation::parse_transaction(raw_tx)?;
        self.index_transaction(&tx, status, block_height)
    }

    /// Index every transaction of a block as confirmed and mark the block done
    pub fn index_block(&mut self, block: &Block, height: u32) -> AppResult<IndexingStats> {
        let mut stats = IndexingStats::default();

        for tx in &block.txdata {
            let outcome = self.index_transaction(tx, TransactionStatus::Confirmed, Some(height))?;
            stats.record(&outcome);
        }

        self.store
            .mark_block_indexed(height, &block.block_hash().to_string())?;
        stats.blocks_indexed = 1;

        debug!(
            "Block {}: {} transactions, {} projects, {} investments",
            height, stats.transactions_seen, stats.projects_found, stats.investments_found
        );
        Ok(stats)
    }

    /// Fetch one transaction and its confirmation status from the chain source
    pub async fn index_txid<C: ChainSource>(
        &mut self,
        source: &C,
        txid: &str,
    ) -> AppResult<IndexOutcome> {
        let raw_tx = source.raw_transaction(txid).await?;
        let status = source.transaction(txid).await?.status;

        self.index_raw_transaction(
            &raw_tx,
            TransactionStatus::from_confirmation(status.confirmed),
            status.block_height,
        )
    }

    /// Fetch and index blocks `from..=to`, skipping blocks already indexed
    pub async fn index_block_range<C: ChainSource>(
        &mut self,
        source: &C,
        from: u32,
        to: u32,
    ) -> AppResult<IndexingStats> {
        if from > to {
            return Err(AppError::InvalidData(format!(
                "Invalid block range: {} > {}",
                from, to
            )));
        }

        let mut stats = IndexingStats::default();

        for height in from..=to {
            if self.store.is_block_indexed(height)? {
                stats.blocks_skipped += 1;
                continue;
            }

            let block_hash = source.block_hash(height).await?;
            let raw_block = source.raw_block(&block_hash).await?;
            let block: Block = deserialize(&raw_block).map_err(|e| {
                AppError::InvalidData(format!("Failed to decode block {}: {}", height, e))
            })?;

            if block.block_hash().to_string() != block_hash {
                warn!(
                    "Block at height {} hashes to {}, source reported {}",
                    height,
                    block.block_hash(),
                    block_hash
                );
            }

            stats.merge(self.index_block(&block, height)?);
        }

        info!(
            "Indexed blocks {}..={}: {} new, {} skipped, {} projects, {} investments",
            from,
            to,
            stats.blocks_indexed,
            stats.blocks_skipped,
            stats.projects_found,
            stats.investments_found
        );
        Ok(stats)
    }
}
