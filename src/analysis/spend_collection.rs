//! Gathering spend data for investment outputs
//!
//! For every investment transaction the taproot outputs are looked up
//! concurrently, each with its own outspend request. The last taproot output
//! additionally needs the outputs of whatever transaction spent it, which is
//! what separates a founder claim from a penalty.

use crate::chain::ChainSource;
use crate::types::{AngorVout, ChildVout};
use bitcoin::ScriptBuf;
use futures::future::join_all;
use tracing::{debug, warn};

const TAPROOT_TYPE: &str = "v1_p2tr";

/// Taproot detection prefers the source's type tag and falls back to parsing
/// the script
pub fn is_taproot(vout: &ChildVout) -> bool {
    match vout.scriptpubkey_type.as_deref() {
        Some(kind) => kind == TAPROOT_TYPE,
        None => ScriptBuf::from_hex(&vout.scriptpubkey)
            .map(|script| script.is_p2tr())
            .unwrap_or(false),
    }
}

/// Fetch spend data for the taproot outputs of each investment
///
/// Returns one list per investment that could be fetched. Outputs whose spend
/// data is unavailable are left out with a warning.
pub async fn collect_angor_vouts<C: ChainSource>(
    source: &C,
    investment_txids: &[String],
) -> Vec<Vec<AngorVout>> {
    let results = join_all(
        investment_txids
            .iter()
            .map(|txid| collect_investment_vouts(source, txid)),
    )
    .await;

    results.into_iter().flatten().collect()
}

async fn collect_investment_vouts<C: ChainSource>(
    source: &C,
    investment_txid: &str,
) -> Option<Vec<AngorVout>> {
    let transaction = match source.transaction(investment_txid).await {
        Ok(tx) => tx,
        Err(e) => {
            warn!(
                "Skipping investment {}: failed to fetch transaction: {}",
                investment_txid, e
            );
            return None;
        }
    };

    let taproot: Vec<(u32, u64)> = transaction
        .vout
        .iter()
        .enumerate()
        .filter(|(_, vout)| is_taproot(vout))
        .map(|(index, vout)| (index as u32, vout.value))
        .collect();

    let last_index = taproot.last().map(|(index, _)| *index);

    let vouts = join_all(taproot.into_iter().map(|(index, value)| {
        collect_vout(
            source,
            investment_txid,
            index,
            value,
            Some(index) == last_index,
        )
    }))
    .await;

    let vouts: Vec<AngorVout> = vouts.into_iter().flatten().collect();
    debug!(
        "Collected {} taproot outputs for investment {}",
        vouts.len(),
        investment_txid
    );
    Some(vouts)
}

async fn collect_vout<C: ChainSource>(
    source: &C,
    investment_txid: &str,
    index: u32,
    value: u64,
    is_last: bool,
) -> Option<AngorVout> {
    let outspend = match source.outspend(investment_txid, index).await {
        Ok(outspend) => outspend,
        Err(e) => {
            warn!(
                "Excluding output {}:{}: outspend lookup failed: {}",
                investment_txid, index, e
            );
            return None;
        }
    };

    let spending_tx_id = outspend.txid.filter(|_| outspend.spent);

    let child_vouts = match (&spending_tx_id, is_last) {
        (Some(spending), true) => match source.transaction(spending).await {
            Ok(spending_tx) => Some(spending_tx.vout),
            Err(e) => {
                warn!(
                    "Excluding output {}:{}: failed to fetch spending transaction {}: {}",
                    investment_txid, index, spending, e
                );
                return None;
            }
        },
        _ => None,
    };

    Some(AngorVout {
        value,
        spent: outspend.spent,
        spending_tx_id,
        investment_tx_id: investment_txid.to_string(),
        is_last,
        child_vouts,
    })
}
