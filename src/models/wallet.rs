use serde::{Deserialize, Serialize};

use super::{
    Claim, DelegationCreated, DelegationFunded, DelegationUpdated, DelegationWithdrawn, Deposit,
    Withdrawal,
};

/// One transaction attached to a wallet's graph, tagged by event kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Tx {
    Deposit(Deposit),
    Withdrawal(Withdrawal),
    Claim(Claim),
    DelegationCreated(DelegationCreated),
    DelegationFunded(DelegationFunded),
    DelegationUpdated(DelegationUpdated),
    DelegationWithdrawn(DelegationWithdrawn),
}

impl Tx {
    /// Resolved event timestamp, if any.
    pub fn timestamp(&self) -> Option<u64> {
        match self {
            Tx::Deposit(tx) => tx.timestamp,
            Tx::Withdrawal(tx) => tx.timestamp,
            Tx::Claim(tx) => tx.timestamp,
            Tx::DelegationCreated(tx) => tx.timestamp,
            Tx::DelegationFunded(tx) => tx.timestamp,
            Tx::DelegationUpdated(tx) => tx.timestamp,
            Tx::DelegationWithdrawn(tx) => tx.timestamp,
        }
    }

    /// The acting wallet (the delegator for delegation events).
    pub fn wallet(&self) -> &str {
        match self {
            Tx::Deposit(tx) => &tx.wallet,
            Tx::Withdrawal(tx) => &tx.wallet,
            Tx::Claim(tx) => &tx.wallet,
            Tx::DelegationCreated(tx) => &tx.delegator,
            Tx::DelegationFunded(tx) => &tx.delegator,
            Tx::DelegationUpdated(tx) => &tx.delegator,
            Tx::DelegationWithdrawn(tx) => &tx.delegator,
        }
    }
}

/// Per-wallet transaction graph for one chain.
///
/// Built fresh each run from the current entity datasets; `txs` is sorted
/// ascending by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntry {
    pub wallet: String,
    pub txs: Vec<Tx>,
    pub current_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_serializes_with_kind_tag() {
        let tx = Tx::Deposit(Deposit {
            tx_hash: "0xabc".to_string(),
            block: 1,
            timestamp: Some(10),
            wallet: "0xdef".to_string(),
            amount: 5.0,
        });
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "deposit");
        assert_eq!(json["data"]["txHash"], "0xabc");
    }

    #[test]
    fn test_delegation_tag_is_camel_case() {
        let tx = Tx::DelegationCreated(DelegationCreated {
            tx_hash: "0x1".to_string(),
            block: 2,
            timestamp: Some(20),
            delegator: "0xa".to_string(),
            delegatee: "0xb".to_string(),
        });
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "delegationCreated");
        assert_eq!(tx.wallet(), "0xa");
    }
}
