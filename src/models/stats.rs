use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Balance;

/// Per-band counts keyed by the band's lower threshold, one 50-entry series
/// per band.
pub type Distributions = BTreeMap<u64, Vec<u64>>;

/// Deposit activity bucketed over the 50-tick stats window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositsOverTime {
    pub timestamps: Vec<u64>,
    pub deposit_amounts: Vec<f64>,
    pub deposit_counts: Vec<u64>,
    pub unique_wallets: Vec<u64>,
    pub distributions: Distributions,
    pub avg_deposit_amounts: Vec<f64>,
    pub cumulative_deposit_amounts: Vec<f64>,
    pub cumulative_deposit_counts: Vec<u64>,
    pub cumulative_unique_wallets: Vec<u64>,
    pub cumulative_distributions: Distributions,
}

/// Withdrawal activity bucketed over the stats window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalsOverTime {
    pub timestamps: Vec<u64>,
    pub withdrawal_amounts: Vec<f64>,
    pub withdrawal_counts: Vec<u64>,
    pub unique_wallets: Vec<u64>,
    pub avg_withdrawal_amounts: Vec<f64>,
    pub cumulative_withdrawal_amounts: Vec<f64>,
    pub cumulative_withdrawal_counts: Vec<u64>,
    pub cumulative_unique_wallets: Vec<u64>,
}

/// Prize claim activity bucketed over the stats window.
///
/// `claim_counts` counts claim transactions; `prize_counts` counts individual
/// prize payouts (one transaction can claim several draws).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsOverTime {
    pub timestamps: Vec<u64>,
    pub claim_amounts: Vec<f64>,
    pub claim_counts: Vec<u64>,
    pub prize_counts: Vec<u64>,
    pub unique_wallets: Vec<u64>,
    pub distributions: Distributions,
    pub avg_claim_amounts: Vec<f64>,
    pub cumulative_claim_amounts: Vec<f64>,
    pub cumulative_claim_counts: Vec<u64>,
    pub cumulative_prize_counts: Vec<u64>,
    pub cumulative_unique_wallets: Vec<u64>,
    pub cumulative_distributions: Distributions,
}

/// Net value locked per tick, derived from the cumulative series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvlOverTime {
    pub timestamps: Vec<u64>,
    pub tvls: Vec<f64>,
}

/// Delegation lifecycle activity bucketed over the stats window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationsOverTime {
    pub timestamps: Vec<u64>,
    pub delegation_amounts: Vec<f64>,
    pub delegation_counts: Vec<u64>,
    pub delegation_withdrawal_amounts: Vec<f64>,
    pub delegation_withdrawal_counts: Vec<u64>,
    pub unique_wallets: Vec<u64>,
    pub avg_delegation_amounts: Vec<f64>,
    pub cumulative_delegation_amounts: Vec<f64>,
    pub cumulative_delegation_counts: Vec<u64>,
    pub cumulative_delegation_withdrawal_amounts: Vec<f64>,
    pub cumulative_delegation_withdrawal_counts: Vec<u64>,
    pub cumulative_unique_wallets: Vec<u64>,
    pub tvls: Vec<f64>,
}

/// Yield sweep activity bucketed over the stats window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldOverTime {
    pub timestamps: Vec<u64>,
    pub yield_amounts: Vec<f64>,
    pub yield_counts: Vec<u64>,
    pub cumulative_yield_amounts: Vec<f64>,
    pub cumulative_yield_counts: Vec<u64>,
}

/// One magnitude band of the current-balance histogram.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandStat {
    pub amount: f64,
    pub count: u64,
}

/// Snapshot histogram of current balances keyed by band threshold.
pub type TvlDistribution = BTreeMap<u64, BandStat>;

/// A wallet that deposited and fully withdrew without ever claiming a prize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinlessWithdrawal {
    pub wallet: String,
    /// Peak of the deposit-minus-withdrawal replay.
    pub max_balance: f64,
    pub first_deposit: u64,
    pub last_withdrawal: u64,
}

/// Aggregated statistics for one chain, recomputed every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStats {
    pub min_timestamp: u64,
    pub max_timestamp: u64,
    pub deposits_over_time: DepositsOverTime,
    pub withdrawals_over_time: WithdrawalsOverTime,
    pub claims_over_time: ClaimsOverTime,
    pub tvl_over_time: TvlOverTime,
    pub delegations_over_time: DelegationsOverTime,
    pub yield_over_time: YieldOverTime,
    pub tvl_distribution: TvlDistribution,
    pub current_users: Vec<String>,
    pub top_whales: Vec<Balance>,
    pub winless_withdrawals: Vec<WinlessWithdrawal>,
}
