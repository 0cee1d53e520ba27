use super::{connect_chain, open_database, ConnectionArgs};
use crate::errors::AppResult;
use crate::processor::{AngorIndexer, IndexOutcome};
use clap::Args;
use tracing::info;

/// Fetch one transaction from the chain source and index it
#[derive(Args)]
pub struct IndexTxCommand {
    /// Transaction ID to index
    pub txid: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl IndexTxCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = self.connection.resolve();
        let source = connect_chain(&config)?;
        let mut indexer = AngorIndexer::new(open_database(&config)?, config.network);

        info!("Indexing transaction {}", self.txid);
        match indexer.index_txid(&source, &self.txid).await? {
            IndexOutcome::Creation(record) => {
                println!(
                    "Project {} ({})",
                    record.project_identifier, record.status
                );
            }
            IndexOutcome::Investment(record) => {
                println!(
                    "Investment of {} sats to {} ({})",
                    record.amount_sats, record.fee_address, record.status
                );
            }
            IndexOutcome::NotAngor => println!("{} is not an Angor transaction", self.txid),
        }
        Ok(())
    }
}
