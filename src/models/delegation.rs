use serde::{Deserialize, Serialize};

use crate::abis::twab_delegator;
use crate::utils::{hex_encode, u256_to_f64};

/// New delegation slot registered between a delegator and a delegatee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationCreated {
    pub tx_hash: String,
    pub block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub delegator: String,
    pub delegatee: String,
}

impl DelegationCreated {
    pub fn from_event(
        event: twab_delegator::DelegationCreated,
        block: u64,
        tx_hash: String,
        timestamp: Option<u64>,
    ) -> Self {
        Self {
            tx_hash,
            block,
            timestamp,
            delegator: hex_encode(event.delegator.as_slice()),
            delegatee: hex_encode(event.delegatee.as_slice()),
        }
    }
}

/// Funds moved into an existing delegation slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationFunded {
    pub tx_hash: String,
    pub block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub delegator: String,
    pub amount: f64,
}

impl DelegationFunded {
    pub fn from_event(
        event: twab_delegator::DelegationFunded,
        block: u64,
        tx_hash: String,
        timestamp: Option<u64>,
        decimals: u8,
    ) -> Self {
        Self {
            tx_hash,
            block,
            timestamp,
            delegator: hex_encode(event.delegator.as_slice()),
            amount: u256_to_f64(event.amount, decimals),
        }
    }
}

/// Delegation slot pointed at a new delegatee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationUpdated {
    pub tx_hash: String,
    pub block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub delegator: String,
    pub new_delegatee: String,
}

impl DelegationUpdated {
    pub fn from_event(
        event: twab_delegator::DelegateeUpdated,
        block: u64,
        tx_hash: String,
        timestamp: Option<u64>,
    ) -> Self {
        Self {
            tx_hash,
            block,
            timestamp,
            delegator: hex_encode(event.delegator.as_slice()),
            new_delegatee: hex_encode(event.delegatee.as_slice()),
        }
    }
}

/// Funds withdrawn out of a delegation slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationWithdrawn {
    pub tx_hash: String,
    pub block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub delegator: String,
    pub amount: f64,
}

impl DelegationWithdrawn {
    pub fn from_event(
        event: twab_delegator::TransferredDelegation,
        block: u64,
        tx_hash: String,
        timestamp: Option<u64>,
        decimals: u8,
    ) -> Self {
        Self {
            tx_hash,
            block,
            timestamp,
            delegator: hex_encode(event.delegator.as_slice()),
            amount: u256_to_f64(event.amount, decimals),
        }
    }
}
