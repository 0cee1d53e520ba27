use super::{connect_chain, open_database, ConnectionArgs};
use crate::analysis::project_stats;
use crate::errors::{AppError, AppResult};
use clap::Args;

/// Compute investment and spend statistics for a project
#[derive(Args)]
pub struct StatsCommand {
    /// Project identifier (angor1...)
    pub project_id: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl StatsCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = self.connection.resolve();
        let database = open_database(&config)?;
        let source = connect_chain(&config)?;

        let stats = project_stats(&database, &source, &self.project_id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidData(format!("Unknown project: {}", self.project_id))
            })?;

        println!("{}", serde_json::to_string_pretty(&stats)?);
        Ok(())
    }
}
