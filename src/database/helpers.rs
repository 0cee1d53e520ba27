//! Row mapping shared by the store operations

use crate::types::{CreationRecord, InvestmentRecord, PayloadVersion, TransactionStatus};
use rusqlite::types::Type;
use rusqlite::Row;
use std::str::FromStr;

/// Standard SELECT columns for `angor_projects`, in `creation_record_from_row` order
pub const PROJECT_SELECT_COLUMNS: &str = "id, founder_key, nostr_pub_key, payload_version, \
    address_on_fee_output, txid, creation_transaction_status, created_on_block, derivation_index";

/// Standard SELECT columns for `angor_investments`, in `investment_record_from_row` order
pub const INVESTMENT_SELECT_COLUMNS: &str = "i.txid, i.amount_sats, i.address_on_fee_output, \
    i.transaction_status, i.investor_pub_key, i.secret_hash, i.created_on_block";

fn parse_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let value: String = row.get(index)?;
    value.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into())
    })
}

pub fn creation_record_from_row(row: &Row) -> rusqlite::Result<CreationRecord> {
    Ok(CreationRecord {
        project_identifier: row.get(0)?,
        founder_key_hex: row.get(1)?,
        nostr_pub_key: row.get(2)?,
        payload_version: parse_column::<PayloadVersion>(row, 3)?,
        fee_address: row.get(4)?,
        txid: row.get(5)?,
        status: parse_column::<TransactionStatus>(row, 6)?,
        block_height: row.get(7)?,
        derivation_index: row.get(8)?,
    })
}

pub fn investment_record_from_row(row: &Row) -> rusqlite::Result<InvestmentRecord> {
    Ok(InvestmentRecord {
        transaction_id: row.get(0)?,
        amount_sats: row.get::<_, i64>(1)? as u64,
        fee_address: row.get(2)?,
        status: parse_column::<TransactionStatus>(row, 3)?,
        founder_pub_key: row.get(4)?,
        secret_hash: row.get(5)?,
        block_height: row.get(6)?,
    })
}
