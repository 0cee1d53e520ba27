//! SQLite implementation of `AngorStore`

use crate::database::helpers::{
    creation_record_from_row, investment_record_from_row, INVESTMENT_SELECT_COLUMNS,
    PROJECT_SELECT_COLUMNS,
};
use crate::database::traits::AngorStore;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{CreationRecord, InvestmentRecord, InvestmentTotals, TransactionStatus};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

impl AngorStore for Database {
    fn set_project(&mut self, project: &CreationRecord) -> AppResult<()> {
        upsert_project(self.connection(), project)
    }

    fn record_creation(&mut self, project: &CreationRecord) -> AppResult<usize> {
        self.execute_transaction(|tx| {
            upsert_project(tx, project)?;
            if project.status == TransactionStatus::Confirmed {
                set_investments_status(tx, &project.fee_address, TransactionStatus::Confirmed)
            } else {
                Ok(0)
            }
        })
    }

    fn get_project(&self, project_id: &str) -> AppResult<Option<CreationRecord>> {
        let project = self
            .connection()
            .query_row(
                &format!(
                    "SELECT {} FROM angor_projects WHERE id = ?1",
                    PROJECT_SELECT_COLUMNS
                ),
                params![project_id],
                creation_record_from_row,
            )
            .optional()?;
        Ok(project)
    }

    fn get_project_by_fee_address(
        &self,
        fee_address: &str,
    ) -> AppResult<Option<CreationRecord>> {
        let project = self
            .connection()
            .query_row(
                &format!(
                    "SELECT {} FROM angor_projects WHERE address_on_fee_output = ?1
                     ORDER BY created_on_block IS NULL, created_on_block LIMIT 1",
                    PROJECT_SELECT_COLUMNS
                ),
                params![fee_address],
                creation_record_from_row,
            )
            .optional()?;
        Ok(project)
    }

    fn get_projects(&self, limit: usize, offset: usize) -> AppResult<Vec<CreationRecord>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {} FROM angor_projects
             ORDER BY created_on_block DESC, id
             LIMIT ?1 OFFSET ?2",
            PROJECT_SELECT_COLUMNS
        ))?;

        let projects = stmt
            .query_map(
                params![limit as i64, offset as i64],
                creation_record_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    /// Upsert keyed by txid; only status and block height change on conflict.
    fn set_investment(&mut self, investment: &InvestmentRecord) -> AppResult<()> {
        self.connection().execute(
            r#"INSERT INTO angor_investments
               (txid, amount_sats, address_on_fee_output, transaction_status,
                investor_pub_key, secret_hash, is_seeder, created_on_block)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
               ON CONFLICT(txid) DO UPDATE SET
                 transaction_status = excluded.transaction_status,
                 created_on_block = COALESCE(excluded.created_on_block, angor_investments.created_on_block)"#,
            params![
                investment.transaction_id,
                investment.amount_sats as i64,
                investment.fee_address,
                investment.status.as_str(),
                investment.founder_pub_key,
                investment.secret_hash,
                investment.is_seeder(),
                investment.block_height,
            ],
        )?;

        debug!(
            "Stored investment {} ({} sats, {})",
            investment.transaction_id, investment.amount_sats, investment.status
        );
        Ok(())
    }

    fn update_investments_status(
        &mut self,
        fee_address: &str,
        status: TransactionStatus,
    ) -> AppResult<usize> {
        set_investments_status(self.connection(), fee_address, status)
    }

    fn get_project_investments(&self, project_id: &str) -> AppResult<Vec<InvestmentRecord>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {} FROM angor_investments i
             INNER JOIN angor_projects p ON p.address_on_fee_output = i.address_on_fee_output
             WHERE p.id = ?1
             ORDER BY i.created_on_block IS NULL, i.created_on_block, i.txid",
            INVESTMENT_SELECT_COLUMNS
        ))?;

        let investments = stmt
            .query_map(params![project_id], investment_record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(investments)
    }

    fn confirmed_projects_count(&self) -> AppResult<u64> {
        let count: i64 = self.connection().query_row(
            "SELECT COUNT(*) FROM angor_projects WHERE creation_transaction_status = ?1",
            params![TransactionStatus::Confirmed.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn confirmed_investments_count(&self) -> AppResult<u64> {
        let count: i64 = self.connection().query_row(
            "SELECT COUNT(*) FROM angor_investments WHERE transaction_status = ?1",
            params![TransactionStatus::Confirmed.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn project_investment_totals(&self, project_id: &str) -> AppResult<InvestmentTotals> {
        let (investor_count, amount_invested): (i64, i64) = self.connection().query_row(
            "SELECT COUNT(i.txid), COALESCE(SUM(i.amount_sats), 0)
             FROM angor_investments i
             INNER JOIN angor_projects p ON p.address_on_fee_output = i.address_on_fee_output
             WHERE p.id = ?1 AND i.transaction_status = ?2",
            params![project_id, TransactionStatus::Confirmed.as_str()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(InvestmentTotals {
            investor_count: investor_count as u64,
            amount_invested: amount_invested as u64,
        })
    }

    fn mark_block_indexed(&mut self, height: u32, block_hash: &str) -> AppResult<()> {
        self.connection().execute(
            "INSERT OR REPLACE INTO angor_blocks (block_height, block_hash) VALUES (?1, ?2)",
            params![height, block_hash],
        )?;
        Ok(())
    }

    fn is_block_indexed(&self, height: u32) -> AppResult<bool> {
        let exists: bool = self.connection().query_row(
            "SELECT EXISTS(SELECT 1 FROM angor_blocks WHERE block_height = ?1)",
            params![height],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

/// Upsert keyed by project identifier.
///
/// A known block height is never cleared by a later update without one.
fn upsert_project(connection: &Connection, project: &CreationRecord) -> AppResult<()> {
    connection.execute(
        r#"INSERT INTO angor_projects
           (id, founder_key, nostr_pub_key, payload_version, derivation_index,
            address_on_fee_output, creation_transaction_status, txid, created_on_block)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
           ON CONFLICT(id) DO UPDATE SET
             creation_transaction_status = excluded.creation_transaction_status,
             created_on_block = COALESCE(excluded.created_on_block, angor_projects.created_on_block)"#,
        params![
            project.project_identifier,
            project.founder_key_hex,
            project.nostr_pub_key,
            project.payload_version.as_str(),
            project.derivation_index,
            project.fee_address,
            project.status.as_str(),
            project.txid,
            project.block_height,
        ],
    )?;

    debug!(
        "Stored project {} ({})",
        project.project_identifier, project.status
    );
    Ok(())
}

fn set_investments_status(
    connection: &Connection,
    fee_address: &str,
    status: TransactionStatus,
) -> AppResult<usize> {
    let updated = connection.execute(
        "UPDATE angor_investments SET transaction_status = ?1
         WHERE address_on_fee_output = ?2",
        params![status.as_str(), fee_address],
    )?;

    debug!(
        "Updated {} investments for fee address {} to {}",
        updated, fee_address, status
    );
    Ok(updated)
}
