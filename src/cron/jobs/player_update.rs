//! Job rebuilding the cross-chain player profiles.

use anyhow::Result;
use log::info;

use crate::player::{run_player_aggregation, ProfileStore};
use crate::storage::Storage;

pub async fn run(
    storage: &dyn Storage,
    profiles: &dyn ProfileStore,
    chains: &[String],
) -> Result<()> {
    info!("Starting player_update job for {} chain(s)...", chains.len());

    let start = std::time::Instant::now();
    run_player_aggregation(storage, profiles, chains).await?;

    info!("Completed player_update job in {:?}", start.elapsed());
    Ok(())
}
