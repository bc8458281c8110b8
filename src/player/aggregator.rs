//! Cross-chain player profile aggregation.

use anyhow::Result;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::models::{ChainTx, PlayerData, Tx, WalletEntry};
use crate::stats::player_series;
use crate::storage::{entity, read_dataset, Storage};

use super::store::ProfileStore;

/// Profiles per document-store write batch.
const PROFILE_WRITE_BATCH: usize = 500;

/// Merge every chain's wallet graph into one cross-chain profile per wallet.
///
/// Each wallet's transactions are tagged with their originating chain and
/// its per-chain balance is recorded. Delegation-created and -updated
/// events are additionally mirrored into the counterparty wallet's list
/// (the delegatee, or the new delegatee) when that counterparty differs
/// from the acting wallet, so a delegatee sees incoming delegation activity
/// indexed under the delegator.
pub fn merge_wallet_graphs(graphs: &[(String, Vec<WalletEntry>)]) -> FxHashMap<String, PlayerData> {
    let mut profiles: FxHashMap<String, PlayerData> = FxHashMap::default();

    for (chain, entries) in graphs {
        for entry in entries {
            for tx in &entry.txs {
                let counterparty = match tx {
                    Tx::DelegationCreated(d) if d.delegatee != d.delegator => {
                        Some(d.delegatee.clone())
                    }
                    Tx::DelegationUpdated(d) if d.new_delegatee != d.delegator => {
                        Some(d.new_delegatee.clone())
                    }
                    _ => None,
                };
                if let Some(counterparty) = counterparty {
                    profiles
                        .entry(counterparty)
                        .or_default()
                        .txs
                        .push(ChainTx {
                            chain: chain.clone(),
                            tx: tx.clone(),
                        });
                }
            }

            let profile = profiles.entry(entry.wallet.clone()).or_default();
            profile.balances.insert(chain.clone(), entry.current_balance);
            profile.txs.extend(entry.txs.iter().map(|tx| ChainTx {
                chain: chain.clone(),
                tx: tx.clone(),
            }));
        }
    }

    for profile in profiles.values_mut() {
        profile.txs.sort_by_key(|chain_tx| chain_tx.tx.timestamp());
        if let Some(series) = player_series(&profile.txs) {
            profile.timestamps = series.timestamps;
            profile.deposits_over_time = series.deposits;
            profile.claims_over_time = series.claims;
            profile.withdrawals_over_time = series.withdrawals;
            profile.balances_over_time = series.balances;
        }
    }

    profiles
}

/// Run one player-aggregation pass: read every chain's wallet graph, merge,
/// and persist the profiles in batches.
pub async fn run_player_aggregation(
    storage: &dyn Storage,
    store: &dyn ProfileStore,
    chains: &[String],
) -> Result<()> {
    // Wallet graphs for all chains are independent reads
    let loads = chains.iter().map(|chain| async move {
        let dataset = read_dataset::<WalletEntry>(storage, chain, entity::WALLETS, false).await;
        (chain.clone(), dataset)
    });
    let mut graphs = Vec::with_capacity(chains.len());
    for (chain, dataset) in futures::future::join_all(loads).await {
        match dataset? {
            Some(dataset) => graphs.push((chain, dataset.data)),
            None => warn!("{chain}: no wallet graph available for player aggregation"),
        }
    }
    if graphs.is_empty() {
        warn!("Player aggregation skipped: no wallet graphs available");
        return Ok(());
    }

    let profiles = merge_wallet_graphs(&graphs);
    let mut batch: Vec<(String, PlayerData)> = profiles.into_iter().collect();
    batch.sort_by(|(a, _), (b, _)| a.cmp(b));

    let total = batch.len();
    for chunk in batch.chunks(PROFILE_WRITE_BATCH) {
        store.save_profiles(chunk).await?;
    }

    info!("Player aggregation complete: {total} profiles persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, DelegationCreated, Deposit};
    use crate::player::store::MemoryProfileStore;
    use crate::storage::{dataset_key, MemoryStorage};

    fn deposit_tx(wallet: &str, amount: f64, timestamp: u64) -> Tx {
        Tx::Deposit(Deposit {
            tx_hash: format!("0x{timestamp}"),
            block: 1,
            timestamp: Some(timestamp),
            wallet: wallet.to_string(),
            amount,
        })
    }

    fn entry(wallet: &str, balance: f64, txs: Vec<Tx>) -> WalletEntry {
        WalletEntry {
            wallet: wallet.to_string(),
            txs,
            current_balance: balance,
        }
    }

    #[test]
    fn test_merge_tags_chains_and_tracks_balances() {
        let graphs = vec![
            (
                "eth".to_string(),
                vec![entry("0xa", 100.0, vec![deposit_tx("0xa", 100.0, 1_000)])],
            ),
            (
                "poly".to_string(),
                vec![entry("0xa", 40.0, vec![deposit_tx("0xa", 40.0, 2_000)])],
            ),
        ];

        let profiles = merge_wallet_graphs(&graphs);
        let profile = &profiles["0xa"];
        assert_eq!(profile.txs.len(), 2);
        assert_eq!(profile.balances["eth"], 100.0);
        assert_eq!(profile.balances["poly"], 40.0);
        // Cross-chain txs are merged chronologically
        assert_eq!(profile.txs[0].chain, "eth");
        assert_eq!(profile.txs[1].chain, "poly");
        assert_eq!(*profile.deposits_over_time.last().unwrap(), 140.0);
        assert_eq!(*profile.balances_over_time.last().unwrap(), 140.0);
    }

    #[test]
    fn test_delegation_mirrored_to_delegatee() {
        let delegation = Tx::DelegationCreated(DelegationCreated {
            tx_hash: "0x1".to_string(),
            block: 1,
            timestamp: Some(1_000),
            delegator: "0xa".to_string(),
            delegatee: "0xb".to_string(),
        });
        let graphs = vec![(
            "eth".to_string(),
            vec![entry("0xa", 10.0, vec![delegation])],
        )];

        let profiles = merge_wallet_graphs(&graphs);
        // The delegatee sees the incoming delegation even though the event
        // is indexed under the delegator
        assert_eq!(profiles["0xb"].txs.len(), 1);
        assert_eq!(profiles["0xb"].txs[0].chain, "eth");
        assert!(profiles["0xb"].balances.is_empty());
        assert_eq!(profiles["0xa"].txs.len(), 1);
    }

    #[test]
    fn test_self_delegation_not_duplicated() {
        let delegation = Tx::DelegationCreated(DelegationCreated {
            tx_hash: "0x1".to_string(),
            block: 1,
            timestamp: Some(1_000),
            delegator: "0xa".to_string(),
            delegatee: "0xa".to_string(),
        });
        let graphs = vec![(
            "eth".to_string(),
            vec![entry("0xa", 10.0, vec![delegation])],
        )];

        let profiles = merge_wallet_graphs(&graphs);
        assert_eq!(profiles["0xa"].txs.len(), 1);
    }

    #[tokio::test]
    async fn test_aggregation_run_persists_batches() {
        let storage = MemoryStorage::new();
        let store = MemoryProfileStore::new();

        let entries: Vec<WalletEntry> = (0..PROFILE_WRITE_BATCH + 3)
            .map(|i| entry(&format!("0x{i:040x}"), 1.0, vec![]))
            .collect();
        let dataset = Dataset {
            last_queried_block: 100,
            timestamp: Some(1),
            data: entries,
        };
        storage
            .write(
                &dataset_key("eth", entity::WALLETS),
                &serde_json::to_vec(&dataset).unwrap(),
            )
            .await
            .unwrap();

        run_player_aggregation(&storage, &store, &["eth".to_string(), "poly".to_string()])
            .await
            .unwrap();

        assert_eq!(
            store.profiles.lock().unwrap().len(),
            PROFILE_WRITE_BATCH + 3
        );
        let sizes = store.batch_sizes.lock().unwrap().clone();
        assert_eq!(sizes, vec![PROFILE_WRITE_BATCH, 3]);
    }
}
