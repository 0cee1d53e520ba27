//! Project statistics over a seeded store and a scripted chain

use angor_indexer::analysis::{collect_angor_vouts, compute_stats_tally, project_stats};
use angor_indexer::database::AngorStore;
use anyhow::Result;

use crate::common::mock_chain::{output, ScriptedChain};
use crate::common::*;

const FEE: &str = "tb1qfeeaddress";
const PROJECT: &str = "angor1qstatsproject";

/// Two investments with three taproot stages each
///
/// Investment 1: stage 1 refunded alone, stages 2 and 3 swept together.
/// Investment 2: stage 1 refunded alone, stage 2 swept, stage 3 claimed by the
/// founder through a two-output transaction.
fn scripted_chain() -> ScriptedChain {
    ScriptedChain::default()
        .with_transaction(
            &txid(1),
            vec![
                output("v0_p2wpkh", 10000000),
                output("v1_p2tr", 100000000),
                output("v1_p2tr", 300000000),
                output("v1_p2tr", 600000000),
                output("v0_p2wpkh", 5000),
            ],
            true,
        )
        .with_transaction(
            &txid(2),
            vec![
                output("v0_p2wpkh", 25000000),
                output("v1_p2tr", 250000000),
                output("v1_p2tr", 750000000),
                output("v1_p2tr", 1500000000),
            ],
            true,
        )
        .with_transaction(&txid(0xb1), vec![output("v0_p2wpkh", 899990000)], true)
        .with_transaction(
            &txid(0xd2),
            vec![
                output("v0_p2wpkh", 1000000000),
                output("v0_p2wpkh", 499990000),
            ],
            true,
        )
        .with_spend(&txid(1), 1, &txid(0xa1))
        .with_spend(&txid(1), 2, &txid(0xb1))
        .with_spend(&txid(1), 3, &txid(0xb1))
        .with_spend(&txid(2), 1, &txid(0xc2))
        .with_spend(&txid(2), 2, &txid(0xd2))
        .with_spend(&txid(2), 3, &txid(0xd2))
}

fn seeded_store() -> Result<(tempfile::TempDir, angor_indexer::database::Database)> {
    let (dir, _path, mut db) = temp_database();
    db.set_project(&project_record(PROJECT, FEE))?;
    db.set_investment(&investment_record(&txid(1), 1000000000, FEE))?;
    db.set_investment(&investment_record(&txid(2), 2500000000, FEE))?;
    Ok((dir, db))
}

#[tokio::test]
async fn test_founder_claim_separated_from_penalty() -> Result<()> {
    let (_dir, db) = seeded_store()?;
    let stats = project_stats(&db, &scripted_chain(), PROJECT)
        .await?
        .expect("project is stored");

    assert_eq!(stats.investor_count, 2);
    assert_eq!(stats.amount_invested, 3500000000);
    assert_eq!(stats.amount_spent_so_far_by_founder, 2600000000);
    assert_eq!(stats.amount_in_penalties, 900000000);
    assert_eq!(stats.count_in_penalties, 1);
    Ok(())
}

#[tokio::test]
async fn test_tally_keys_founder_claim_by_value() {
    let chain = scripted_chain();
    let vouts = collect_angor_vouts(&chain, &[txid(1), txid(2)]).await;
    let tally = compute_stats_tally(&vouts);

    let claim_key = format!("{}-1500000000-{}", txid(2), txid(0xd2));
    assert_eq!(tally.len(), 5);
    assert_eq!(tally[&claim_key].number_of_tx, 1);
    assert_eq!(
        tally[&format!("{}-{}", txid(1), txid(0xb1))].total_amount,
        900000000
    );
}

#[tokio::test]
async fn test_fan_out_request_count() {
    let chain = scripted_chain();
    collect_angor_vouts(&chain, &[txid(1), txid(2)]).await;

    // per investment: one transaction, three outspends, one spending transaction
    assert_eq!(chain.request_count(), 10);
}

#[tokio::test]
async fn test_pending_investments_are_not_counted() -> Result<()> {
    let (_dir, mut db) = seeded_store()?;
    let mut pending = investment_record(&txid(3), 700000000, FEE);
    pending.status = angor_indexer::types::TransactionStatus::Pending;
    db.set_investment(&pending)?;

    let stats = project_stats(&db, &scripted_chain(), PROJECT)
        .await?
        .expect("project is stored");
    assert_eq!(stats.investor_count, 2);
    assert_eq!(stats.amount_invested, 3500000000);
    Ok(())
}

#[tokio::test]
async fn test_unknown_project() -> Result<()> {
    let (_dir, db) = seeded_store()?;
    assert!(project_stats(&db, &scripted_chain(), "angor1qmissing")
        .await?
        .is_none());
    Ok(())
}
