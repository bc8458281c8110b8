pub mod balance;
pub mod claim;
pub mod dataset;
pub mod delegation;
pub mod deposit;
pub mod player;
pub mod stats;
pub mod supply;
pub mod wallet;
pub mod withdrawal;
pub mod yield_capture;

pub use balance::Balance;
pub use claim::Claim;
pub use dataset::Dataset;
pub use delegation::{
    DelegationCreated, DelegationFunded, DelegationUpdated, DelegationWithdrawn,
};
pub use deposit::Deposit;
pub use player::{ChainTx, PlayerData};
pub use stats::{
    BandStat, ChainStats, ClaimsOverTime, DelegationsOverTime, DepositsOverTime, Distributions,
    TvlDistribution, TvlOverTime, WinlessWithdrawal, WithdrawalsOverTime, YieldOverTime,
};
pub use supply::Supply;
pub use wallet::{Tx, WalletEntry};
pub use withdrawal::Withdrawal;
pub use yield_capture::YieldCapture;
