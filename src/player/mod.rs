//! Cross-chain player profiles.

mod aggregator;
mod store;

pub use aggregator::{merge_wallet_graphs, run_player_aggregation};
pub use store::{FsProfileStore, ProfileStore};

#[cfg(test)]
pub use store::MemoryProfileStore;
