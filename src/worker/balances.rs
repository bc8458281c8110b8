//! Balance snapshotting via batched multicall reads.

use std::cmp::Ordering;

use alloy::primitives::Address;
use anyhow::Result;
use log::warn;
use rustc_hash::FxHashMap;

use crate::models::{Balance, Claim, Dataset, Deposit, Withdrawal};
use crate::scanner::ChainSource;
use crate::utils::u256_to_f64;

/// Balance queries per multicall request, issued sequentially to bound RPC
/// burst rate.
pub const BALANCE_BATCH_SIZE: usize = 500;

/// Refresh the balance dataset for every wallet seen in deposit, withdrawal,
/// or claim history.
///
/// The candidate set can be bounded with `recent_activity_window_secs`: only
/// wallets whose newest event falls within that window of the newest event
/// overall are re-queried. Balances are read at `end_block` (which mirrors
/// the deposits checkpoint and may lag the chain head), upserted into the
/// prior dataset, and the whole set is re-sorted non-increasing by balance.
#[allow(clippy::too_many_arguments)]
pub async fn snapshot_balances<S: ChainSource + ?Sized>(
    source: &S,
    ticket: Address,
    end_block: u64,
    decimals: u8,
    recent_activity_window_secs: Option<u64>,
    deposits: &[Deposit],
    withdrawals: &[Withdrawal],
    claims: &[Claim],
    mut prior: Dataset<Balance>,
) -> Result<Dataset<Balance>> {
    let candidates = candidate_wallets(
        deposits,
        withdrawals,
        claims,
        recent_activity_window_secs,
    );

    let mut resolved: Vec<(String, Address)> = Vec::with_capacity(candidates.len());
    for wallet in candidates {
        match wallet.parse::<Address>() {
            Ok(address) => resolved.push((wallet, address)),
            Err(_) => warn!("Skipping unparseable wallet address {wallet}"),
        }
    }

    for chunk in resolved.chunks(BALANCE_BATCH_SIZE) {
        let holders: Vec<Address> = chunk.iter().map(|(_, address)| *address).collect();
        let balances = source.balance_of_batch(ticket, &holders, end_block).await?;
        for ((wallet, _), raw) in chunk.iter().zip(balances) {
            upsert_balance(&mut prior.data, wallet, u256_to_f64(raw, decimals));
        }
    }

    // Invariant: sorted non-increasing by balance at rest
    prior
        .data
        .sort_by(|a, b| b.balance.partial_cmp(&a.balance).unwrap_or(Ordering::Equal));
    prior.last_queried_block = end_block;

    Ok(prior)
}

/// Union of wallets across the three event datasets, optionally restricted
/// to recent activity, in deterministic order.
fn candidate_wallets(
    deposits: &[Deposit],
    withdrawals: &[Withdrawal],
    claims: &[Claim],
    recent_activity_window_secs: Option<u64>,
) -> Vec<String> {
    let mut newest_seen: FxHashMap<String, u64> = FxHashMap::default();
    {
        let mut note = |wallet: &str, timestamp: Option<u64>| {
            let ts = timestamp.unwrap_or(0);
            let entry = newest_seen.entry(wallet.to_string()).or_insert(0);
            if ts > *entry {
                *entry = ts;
            }
        };
        for d in deposits {
            note(&d.wallet, d.timestamp);
        }
        for w in withdrawals {
            note(&w.wallet, w.timestamp);
        }
        for c in claims {
            note(&c.wallet, c.timestamp);
        }
    }

    let newest_overall = newest_seen.values().copied().max().unwrap_or(0);
    let mut wallets: Vec<String> = newest_seen
        .into_iter()
        .filter(|(_, newest)| match recent_activity_window_secs {
            Some(window) => newest_overall.saturating_sub(*newest) <= window,
            None => true,
        })
        .map(|(wallet, _)| wallet)
        .collect();
    wallets.sort();
    wallets
}

fn upsert_balance(data: &mut Vec<Balance>, wallet: &str, balance: f64) {
    if let Some(existing) = data.iter_mut().find(|entry| entry.wallet == wallet) {
        existing.balance = balance;
    } else {
        data.push(Balance {
            wallet: wallet.to_string(),
            balance,
        });
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, U256};

    use super::*;
    use crate::scanner::fixture::FixtureSource;
    use crate::utils::hex_encode;

    const DECIMALS: u8 = 6;

    fn units(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64.pow(DECIMALS as u32))
    }

    fn deposit(wallet: Address, amount: f64, timestamp: u64) -> Deposit {
        Deposit {
            tx_hash: "0x1".to_string(),
            block: 1,
            timestamp: Some(timestamp),
            wallet: hex_encode(wallet.as_slice()),
            amount,
        }
    }

    #[tokio::test]
    async fn test_snapshot_upserts_and_sorts_descending() {
        let ticket = Address::repeat_byte(0x33);
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let mut source = FixtureSource::new(300);
        source.balances.insert(a, units(65));
        source.balances.insert(b, units(700));

        // Wallet a already has a stale prior entry
        let mut prior: Dataset<Balance> = Dataset::new(100);
        prior.data.push(Balance {
            wallet: hex_encode(a.as_slice()),
            balance: 10.0,
        });

        let deposits = vec![deposit(a, 50.0, 1_000), deposit(b, 700.0, 2_000)];
        let dataset = snapshot_balances(
            &source,
            ticket,
            300,
            DECIMALS,
            None,
            &deposits,
            &[],
            &[],
            prior,
        )
        .await
        .unwrap();

        assert_eq!(dataset.last_queried_block, 300);
        assert_eq!(dataset.data.len(), 2);
        // Sorted non-increasing, stale entry overwritten rather than duplicated
        assert_eq!(dataset.data[0].balance, 700.0);
        assert_eq!(dataset.data[1].wallet, hex_encode(a.as_slice()));
        assert_eq!(dataset.data[1].balance, 65.0);
    }

    #[tokio::test]
    async fn test_snapshot_batches_of_five_hundred() {
        let ticket = Address::repeat_byte(0x33);
        let source = FixtureSource::new(300);

        let deposits: Vec<Deposit> = (0..(BALANCE_BATCH_SIZE + 31))
            .map(|i| {
                let mut bytes = [0u8; 20];
                bytes[..8].copy_from_slice(&(i as u64).to_be_bytes());
                deposit(Address::from(bytes), 1.0, 1_000)
            })
            .collect();

        let dataset = snapshot_balances(
            &source,
            ticket,
            300,
            DECIMALS,
            None,
            &deposits,
            &[],
            &[],
            Dataset::new(0),
        )
        .await
        .unwrap();

        assert_eq!(dataset.data.len(), BALANCE_BATCH_SIZE + 31);
        let sizes = source.balance_batch_sizes.lock().unwrap().clone();
        assert_eq!(sizes, vec![BALANCE_BATCH_SIZE, 31]);
    }

    #[tokio::test]
    async fn test_recency_window_bounds_candidates() {
        let ticket = Address::repeat_byte(0x33);
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let mut source = FixtureSource::new(300);
        source.balances.insert(a, units(5));
        source.balances.insert(b, units(9));

        // b is 10_000s older than the newest event; window of 1_000s drops it
        let deposits = vec![deposit(a, 5.0, 20_000), deposit(b, 9.0, 10_000)];
        let dataset = snapshot_balances(
            &source,
            ticket,
            300,
            DECIMALS,
            Some(1_000),
            &deposits,
            &[],
            &[],
            Dataset::new(0),
        )
        .await
        .unwrap();

        assert_eq!(dataset.data.len(), 1);
        assert_eq!(dataset.data[0].wallet, hex_encode(a.as_slice()));
    }
}
