//! Per-player time series.

use crate::models::{ChainTx, Tx};

use super::ticks::{tick_boundaries_inclusive, tick_index, TICKS};

/// Cumulative activity curves for one wallet, bounded by the wallet's own
/// first and last transaction timestamps.
#[derive(Debug, Clone)]
pub struct PlayerSeries {
    pub timestamps: Vec<u64>,
    pub deposits: Vec<f64>,
    pub claims: Vec<f64>,
    pub withdrawals: Vec<f64>,
    pub balances: Vec<f64>,
}

/// Compute a wallet's 50-tick cumulative series, or None when it has no
/// timestamped transactions.
pub fn player_series(txs: &[ChainTx]) -> Option<PlayerSeries> {
    let mut stamped: Vec<(u64, &Tx)> = txs
        .iter()
        .filter_map(|chain_tx| chain_tx.tx.timestamp().map(|ts| (ts, &chain_tx.tx)))
        .collect();
    if stamped.is_empty() {
        return None;
    }
    stamped.sort_by_key(|(ts, _)| *ts);

    let first = stamped.first().expect("non-empty").0;
    let last = stamped.last().expect("non-empty").0;
    let timestamps = tick_boundaries_inclusive(first, last);

    let mut deposit_amounts = vec![0.0; TICKS];
    let mut claim_amounts = vec![0.0; TICKS];
    let mut withdrawal_amounts = vec![0.0; TICKS];
    for (ts, tx) in stamped {
        let Some(i) = tick_index(&timestamps, ts) else {
            continue;
        };
        match tx {
            Tx::Deposit(d) => deposit_amounts[i] += d.amount,
            Tx::Claim(c) => claim_amounts[i] += c.total(),
            Tx::Withdrawal(w) => withdrawal_amounts[i] += w.amount,
            _ => {}
        }
    }

    let mut deposits = Vec::with_capacity(TICKS);
    let mut claims = Vec::with_capacity(TICKS);
    let mut withdrawals = Vec::with_capacity(TICKS);
    let mut balances = Vec::with_capacity(TICKS);
    let (mut dep, mut clm, mut wdr) = (0.0, 0.0, 0.0);
    for i in 0..TICKS {
        dep += deposit_amounts[i];
        clm += claim_amounts[i];
        wdr += withdrawal_amounts[i];
        deposits.push(dep);
        claims.push(clm);
        withdrawals.push(wdr);
        balances.push(dep + clm - wdr);
    }

    Some(PlayerSeries {
        timestamps,
        deposits,
        claims,
        withdrawals,
        balances,
    })
}
