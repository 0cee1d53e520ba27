//! End-to-end indexing against a file-backed store

use angor_indexer::database::{AngorStore, Database};
use angor_indexer::processor::{AngorIndexer, IndexOutcome};
use angor_indexer::types::{AngorNetwork, PayloadVersion, TransactionStatus};
use anyhow::Result;

use crate::common::mock_chain::{output, ScriptedChain};
use crate::common::*;

#[test]
fn test_creation_indexed_twice_is_one_confirmed_project() -> Result<()> {
    let (_dir, path, db) = temp_database();
    let mut indexer = AngorIndexer::new(db, AngorNetwork::Testnet);

    indexer.index_raw_transaction(&raw(CREATION_TX), TransactionStatus::Pending, None)?;
    indexer.index_raw_transaction(
        &raw(CREATION_TX),
        TransactionStatus::Confirmed,
        Some(2540000),
    )?;
    drop(indexer);

    let reopened = Database::new(&path)?;
    let projects = reopened.get_projects(100, 0)?;
    assert_eq!(projects.len(), 1);

    let project = &projects[0];
    assert_eq!(project.project_identifier, PROJECT_ID);
    assert_eq!(project.txid, CREATION_TXID);
    assert_eq!(project.fee_address, CREATION_FEE_ADDRESS);
    assert_eq!(project.status, TransactionStatus::Confirmed);
    assert_eq!(project.block_height, Some(2540000));
    assert_eq!(project.payload_version, PayloadVersion::V1);
    assert_eq!(project.derivation_index, 1011945700);
    Ok(())
}

#[test]
fn test_investment_recognised_only_for_known_fee_address() -> Result<()> {
    let (_dir, _path, db) = temp_database();
    let mut indexer = AngorIndexer::new(db, AngorNetwork::Testnet);

    let outcome =
        indexer.index_raw_transaction(&raw(INVESTMENT_TX), TransactionStatus::Pending, None)?;
    assert_eq!(outcome, IndexOutcome::NotAngor);

    let (_dir, _path, mut db) = temp_database();
    db.set_project(&project_record("angor1qproject", INVESTMENT_FEE_ADDRESS))?;
    let mut indexer = AngorIndexer::new(db, AngorNetwork::Testnet);

    let outcome = indexer.index_raw_transaction(
        &raw(INVESTMENT_TX),
        TransactionStatus::Confirmed,
        Some(2540001),
    )?;
    let record = match outcome {
        IndexOutcome::Investment(record) => record,
        other => panic!("expected investment, got {:?}", other),
    };

    assert_eq!(record.transaction_id, INVESTMENT_TXID);
    assert_eq!(record.amount_sats, 2000000);
    assert_eq!(
        record.founder_pub_key,
        "02e6c8752b2fe17ccda2d77d199bfa0f6c7e5cd5190fb6a93bf10a2f3d67be48cd"
    );
    assert!(!record.is_seeder());

    let totals = indexer.store().project_investment_totals("angor1qproject")?;
    assert_eq!(totals.investor_count, 1);
    assert_eq!(totals.amount_invested, 2000000);
    Ok(())
}

#[tokio::test]
async fn test_index_txid_fetches_status_from_source() -> Result<()> {
    let chain = ScriptedChain::default()
        .with_raw(CREATION_TXID, raw(CREATION_TX))
        .with_transaction(CREATION_TXID, vec![output("v0_p2wpkh", 10000)], false);

    let (_dir, _path, db) = temp_database();
    let mut indexer = AngorIndexer::new(db, AngorNetwork::Testnet);

    let outcome = indexer.index_txid(&chain, CREATION_TXID).await?;
    match outcome {
        IndexOutcome::Creation(record) => {
            assert_eq!(record.status, TransactionStatus::Pending);
            assert_eq!(record.block_height, None);
        }
        other => panic!("expected creation, got {:?}", other),
    }
    assert_eq!(indexer.store().confirmed_projects_count()?, 0);
    Ok(())
}

#[tokio::test]
async fn test_index_txid_unknown_to_source_is_an_error() {
    let chain = ScriptedChain::default();
    let (_dir, _path, db) = temp_database();
    let mut indexer = AngorIndexer::new(db, AngorNetwork::Testnet);

    assert!(indexer.index_txid(&chain, &txid(0x99)).await.is_err());
}
