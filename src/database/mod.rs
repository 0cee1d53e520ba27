//! SQLite persistence for decoded Angor projects and investments.
//!
//! ## Architecture
//!
//! The `Database` struct holds a single SQLite connection and implements the
//! `AngorStore` trait, which is all the indexer and stats engine depend on.

pub mod helpers;
mod operations;
pub mod schema;
pub mod traits;

pub use schema::setup_schema;
pub use traits::AngorStore;

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::info;

/// The main database interface
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) the database at `database_path` and initialise the schema
    ///
    /// `":memory:"` gives a throwaway in-memory database.
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self { connection })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
