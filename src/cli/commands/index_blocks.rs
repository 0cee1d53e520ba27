use super::{connect_chain, open_database, ConnectionArgs};
use crate::errors::AppResult;
use crate::processor::AngorIndexer;
use clap::Args;

/// Index every Angor transaction in a range of blocks
#[derive(Args)]
pub struct IndexBlocksCommand {
    /// First block height (inclusive)
    #[arg(long)]
    pub from: u32,

    /// Last block height (inclusive)
    #[arg(long)]
    pub to: u32,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl IndexBlocksCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = self.connection.resolve();
        let source = connect_chain(&config)?;
        let mut indexer = AngorIndexer::new(open_database(&config)?, config.network);

        let stats = indexer
            .index_block_range(&source, self.from, self.to)
            .await?;

        println!("\n=== INDEXING SUMMARY ===");
        println!("Blocks indexed:     {}", stats.blocks_indexed);
        println!("Blocks skipped:     {}", stats.blocks_skipped);
        println!("Transactions seen:  {}", stats.transactions_seen);
        println!("Projects found:     {}", stats.projects_found);
        println!("Investments found:  {}", stats.investments_found);
        println!(
            "Request errors:     {} (cache hits {})",
            source.get_error_count(),
            source.get_cache_stats().hits
        );
        Ok(())
    }
}
