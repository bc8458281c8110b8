//! Wallet transaction-graph construction.

use rustc_hash::FxHashMap;

use crate::models::{
    Balance, Claim, DelegationCreated, DelegationFunded, DelegationUpdated, DelegationWithdrawn,
    Deposit, Tx, WalletEntry, Withdrawal,
};

/// Merge every per-entity dataset into one chronological transaction list
/// per wallet, carrying the wallet's current balance.
///
/// The balance snapshot seeds the wallet set: events for wallets without a
/// known balance are dropped, since the snapshot's scope can be narrower
/// than full event history. Events without a resolved timestamp are also
/// excluded (they cannot be placed on the timeline). Delegatee-side
/// mirroring happens during cross-chain player aggregation, not here.
#[allow(clippy::too_many_arguments)]
pub fn build_wallet_graph(
    balances: &[Balance],
    deposits: &[Deposit],
    withdrawals: &[Withdrawal],
    claims: &[Claim],
    delegations_created: &[DelegationCreated],
    delegations_funded: &[DelegationFunded],
    delegations_updated: &[DelegationUpdated],
    delegations_withdrawn: &[DelegationWithdrawn],
) -> Vec<WalletEntry> {
    let mut entries: Vec<WalletEntry> = balances
        .iter()
        .map(|balance| WalletEntry {
            wallet: balance.wallet.clone(),
            txs: Vec::new(),
            current_balance: balance.balance,
        })
        .collect();
    let index: FxHashMap<&str, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.wallet.as_str(), i))
        .collect();

    let mut txs: Vec<(usize, Tx)> = Vec::new();
    {
        let mut attach = |wallet: &str, tx: Tx| {
            if tx.timestamp().is_none() {
                return;
            }
            if let Some(&i) = index.get(wallet) {
                txs.push((i, tx));
            }
        };
        for d in deposits {
            attach(&d.wallet, Tx::Deposit(d.clone()));
        }
        for w in withdrawals {
            attach(&w.wallet, Tx::Withdrawal(w.clone()));
        }
        for c in claims {
            attach(&c.wallet, Tx::Claim(c.clone()));
        }
        for d in delegations_created {
            attach(&d.delegator, Tx::DelegationCreated(d.clone()));
        }
        for d in delegations_funded {
            attach(&d.delegator, Tx::DelegationFunded(d.clone()));
        }
        for d in delegations_updated {
            attach(&d.delegator, Tx::DelegationUpdated(d.clone()));
        }
        for d in delegations_withdrawn {
            attach(&d.delegator, Tx::DelegationWithdrawn(d.clone()));
        }
    }

    for (i, tx) in txs {
        entries[i].txs.push(tx);
    }
    for entry in &mut entries {
        entry.txs.sort_by_key(|tx| tx.timestamp());
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit(wallet: &str, amount: f64, timestamp: Option<u64>) -> Deposit {
        Deposit {
            tx_hash: "0xd".to_string(),
            block: 1,
            timestamp,
            wallet: wallet.to_string(),
            amount,
        }
    }

    fn withdrawal(wallet: &str, amount: f64, timestamp: u64) -> Withdrawal {
        Withdrawal {
            tx_hash: "0xw".to_string(),
            block: 2,
            timestamp: Some(timestamp),
            wallet: wallet.to_string(),
            amount,
        }
    }

    #[test]
    fn test_graph_seeds_from_balances_and_sorts_chronologically() {
        let balances = vec![Balance {
            wallet: "0xa".to_string(),
            balance: 65.0,
        }];
        let deposits = vec![
            deposit("0xa", 25.0, Some(2_000)),
            deposit("0xa", 50.0, Some(1_000)),
        ];
        let withdrawals = vec![withdrawal("0xa", 10.0, 3_000)];

        let graph = build_wallet_graph(
            &balances,
            &deposits,
            &withdrawals,
            &[],
            &[],
            &[],
            &[],
            &[],
        );

        assert_eq!(graph.len(), 1);
        let entry = &graph[0];
        assert_eq!(entry.current_balance, 65.0);
        assert_eq!(entry.txs.len(), 3);
        let timestamps: Vec<u64> = entry.txs.iter().filter_map(|tx| tx.timestamp()).collect();
        assert_eq!(timestamps, vec![1_000, 2_000, 3_000]);
    }

    #[test]
    fn test_events_for_unknown_wallets_are_dropped() {
        let balances = vec![Balance {
            wallet: "0xa".to_string(),
            balance: 1.0,
        }];
        // 0xb never made it into the balance snapshot
        let deposits = vec![deposit("0xb", 9.0, Some(1_000))];

        let graph =
            build_wallet_graph(&balances, &deposits, &[], &[], &[], &[], &[], &[]);

        assert_eq!(graph.len(), 1);
        assert!(graph[0].txs.is_empty());
    }

    #[test]
    fn test_events_without_timestamps_are_excluded() {
        let balances = vec![Balance {
            wallet: "0xa".to_string(),
            balance: 1.0,
        }];
        let deposits = vec![deposit("0xa", 9.0, None)];

        let graph =
            build_wallet_graph(&balances, &deposits, &[], &[], &[], &[], &[], &[]);

        assert!(graph[0].txs.is_empty());
    }
}
