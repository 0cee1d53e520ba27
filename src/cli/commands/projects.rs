use super::{open_database, ConnectionArgs};
use crate::database::AngorStore;
use crate::errors::AppResult;
use clap::Args;
use tracing::info;

/// List indexed projects, newest first
#[derive(Args)]
pub struct ProjectsCommand {
    /// Maximum number of projects to list
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Number of projects to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl ProjectsCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = self.connection.resolve();
        let database = open_database(&config)?;

        let projects = database.get_projects(self.limit, self.offset)?;
        println!("{}", serde_json::to_string_pretty(&projects)?);
        info!(
            "Confirmed projects: {}, confirmed investments: {}",
            database.confirmed_projects_count()?,
            database.confirmed_investments_count()?
        );
        Ok(())
    }
}
