use serde::{Deserialize, Serialize};

use crate::abis::prize_distributor;
use crate::utils::{hex_encode, u256_to_f64};

/// Prize claim record.
///
/// One record per distinct transaction hash: a transaction claiming several
/// draws emits one payout log per draw, and each payout after the first is
/// appended to the existing record's `prizes` list rather than creating a
/// new record. Invariant: no two claims in one dataset share a tx_hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub tx_hash: String,
    pub block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub wallet: String,
    pub prizes: Vec<f64>,
}

impl Claim {
    pub fn from_event(
        event: prize_distributor::ClaimedDraw,
        block: u64,
        tx_hash: String,
        timestamp: Option<u64>,
        decimals: u8,
    ) -> Self {
        Self {
            tx_hash,
            block,
            timestamp,
            wallet: hex_encode(event.user.as_slice()),
            prizes: vec![scale_prize(event.payout, decimals)],
        }
    }

    /// Total amount claimed across all prizes in this transaction.
    pub fn total(&self) -> f64 {
        self.prizes.iter().sum()
    }
}

/// Scale a raw payout and round up to whole units.
pub fn scale_prize(payout: alloy::primitives::U256, decimals: u8) -> f64 {
    u256_to_f64(payout, decimals).ceil()
}
