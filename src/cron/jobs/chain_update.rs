//! Job running one full pipeline pass for a chain.

use anyhow::Result;
use log::info;

use crate::scanner::ChainSource;
use crate::worker::ChainWorker;

pub async fn run<S: ChainSource>(worker: &ChainWorker<S>) -> Result<()> {
    info!("Starting chain_update job for {}...", worker.chain_name());

    let start = std::time::Instant::now();
    worker.run_once().await?;

    info!(
        "Completed chain_update job for {} in {:?}",
        worker.chain_name(),
        start.elapsed()
    );
    Ok(())
}
