//! SQLite schema for indexed Angor data
//!
//! - `angor_projects`: one row per project identifier, upserted from creation
//!   transactions
//! - `angor_investments`: one row per investment transaction, correlated with
//!   its project through the fee output address
//! - `angor_blocks`: blocks whose transactions have been indexed

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA user_version = 1;

        CREATE TABLE IF NOT EXISTS angor_projects (
            id TEXT PRIMARY KEY,
            founder_key TEXT NOT NULL,
            nostr_pub_key TEXT NOT NULL,
            payload_version TEXT NOT NULL CHECK (payload_version IN ('v1', 'v2')),
            derivation_index INTEGER NOT NULL,
            address_on_fee_output TEXT NOT NULL,
            creation_transaction_status TEXT NOT NULL
                CHECK (creation_transaction_status IN ('not_identified', 'pending', 'confirmed')),
            txid TEXT NOT NULL,
            created_on_block INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_projects_fee_address
            ON angor_projects(address_on_fee_output);
        CREATE INDEX IF NOT EXISTS idx_projects_block
            ON angor_projects(created_on_block);

        CREATE TABLE IF NOT EXISTS angor_investments (
            txid TEXT PRIMARY KEY,
            amount_sats INTEGER NOT NULL,
            address_on_fee_output TEXT NOT NULL,
            transaction_status TEXT NOT NULL
                CHECK (transaction_status IN ('not_identified', 'pending', 'confirmed')),
            investor_pub_key TEXT NOT NULL,
            secret_hash TEXT,
            is_seeder INTEGER NOT NULL DEFAULT 0,
            created_on_block INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_investments_fee_address
            ON angor_investments(address_on_fee_output);

        CREATE TABLE IF NOT EXISTS angor_blocks (
            block_height INTEGER PRIMARY KEY,
            block_hash TEXT NOT NULL,
            indexed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )?;

    debug!("Angor schema ready");
    Ok(())
}
