//! CLI Smoke Test
//!
//! Runs the offline commands of the built binary and checks their output.

use std::process::Command;
use tempfile::TempDir;

use crate::common::*;

fn angor_indexer() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_angor-indexer"));
    command
        .env_remove("ANGOR_NETWORK")
        .env_remove("ANGOR_DATABASE_PATH")
        .env_remove("ANGOR_ESPLORA_URL");
    command
}

#[test]
fn test_derive_prints_project_identifier() {
    let output = angor_indexer()
        .args(["derive", FOUNDER_KEY, "--network", "testnet"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(PROJECT_ID));
    assert!(stdout.contains("1011945700"));
    assert!(stdout.contains("cacedcee9bc28a37b36718ea210fcf7caac182cdb66cc17fafb6027478a221c8"));
}

#[test]
fn test_derive_rejects_short_key() {
    let output = angor_indexer()
        .args(["derive", "0352eb18", "--network", "testnet"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("33 bytes"));
}

#[test]
fn test_decode_investment_prints_json() {
    let output = angor_indexer()
        .args([
            "decode",
            INVESTMENT_TX,
            "--network",
            "testnet",
            "--kind",
            "investment",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["transactionId"], INVESTMENT_TXID);
    assert_eq!(record["amountSats"], 2000000);
    assert_eq!(record["feeAddress"], INVESTMENT_FEE_ADDRESS);
}

#[test]
fn test_decode_investment_as_creation_fails() {
    let output = angor_indexer()
        .args(["decode", INVESTMENT_TX, "--network", "testnet"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_projects_on_empty_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("cli.db");

    let output = angor_indexer()
        .args(["projects", "--database-path"])
        .arg(&db_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let projects: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(projects, serde_json::json!([]));
}
