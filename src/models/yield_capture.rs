use serde::{Deserialize, Serialize};

use crate::abis::flush;
use crate::utils::u256_to_f64;

/// Yield sweep record (protocol-level, no wallet attribution).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldCapture {
    pub tx_hash: String,
    pub block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub amount: f64,
}

impl YieldCapture {
    pub fn from_event(
        event: flush::Flushed,
        block: u64,
        tx_hash: String,
        timestamp: Option<u64>,
        decimals: u8,
    ) -> Self {
        Self {
            tx_hash,
            block,
            timestamp,
            amount: u256_to_f64(event.amount, decimals),
        }
    }
}
