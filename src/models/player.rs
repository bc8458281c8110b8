use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Tx;

/// A wallet transaction tagged with its originating chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainTx {
    pub chain: String,
    #[serde(flatten)]
    pub tx: Tx,
}

/// Cross-chain profile of one wallet, persisted to the player document store.
///
/// Recomputed in full on every player-aggregation run. The time series use
/// the wallet's own first/last transaction timestamps as bounds, unlike
/// chain stats which span the protocol-wide window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub txs: Vec<ChainTx>,
    pub timestamps: Vec<u64>,
    pub deposits_over_time: Vec<f64>,
    pub claims_over_time: Vec<f64>,
    pub withdrawals_over_time: Vec<f64>,
    pub balances_over_time: Vec<f64>,
    /// Current balance per chain tag.
    pub balances: BTreeMap<String, f64>,
}
