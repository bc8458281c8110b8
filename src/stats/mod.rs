//! Windowed statistics over the per-chain datasets.
//!
//! - [`ticks`] - tick-boundary construction and magnitude-band tables
//! - [`aggregator`] - chain-level 50-tick series, histograms, cohorts
//! - [`player`] - per-wallet cumulative series

pub mod aggregator;
pub mod player;
pub mod ticks;

pub use aggregator::{aggregate, StatsInputs};
pub use player::{player_series, PlayerSeries};
pub use ticks::{
    band_index, tick_boundaries, tick_boundaries_inclusive, tick_index, BALANCE_BANDS,
    CLAIM_BANDS, DEPOSIT_BANDS, TICKS,
};
