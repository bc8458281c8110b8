use serde::{Deserialize, Serialize};

use crate::abis::prize_pool;
use crate::utils::{hex_encode, u256_to_f64};

/// Prize pool withdrawal event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub tx_hash: String,
    pub block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub wallet: String,
    pub amount: f64,
}

impl Withdrawal {
    pub fn from_event(
        event: prize_pool::Withdrawal,
        block: u64,
        tx_hash: String,
        timestamp: Option<u64>,
        decimals: u8,
    ) -> Self {
        Self {
            tx_hash,
            block,
            timestamp,
            wallet: hex_encode(event.operator.as_slice()),
            amount: u256_to_f64(event.amount, decimals),
        }
    }
}
