//! Cron scheduler for the recurring indexing jobs.
//!
//! Registers:
//! - One dataset-update job per configured chain (several-hour period)
//! - One cross-chain player-aggregation job, offset behind the chain jobs
//!   so it always sees freshly rebuilt wallet graphs

use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::config::SchedulerSettings;
use crate::player::ProfileStore;
use crate::scanner::RpcSource;
use crate::storage::Storage;
use crate::worker::ChainWorker;

use super::jobs;

/// Cron scheduler that manages the periodic indexing jobs.
pub struct CronScheduler {
    workers: Vec<Arc<ChainWorker<RpcSource>>>,
    storage: Arc<dyn Storage>,
    profiles: Arc<dyn ProfileStore>,
    settings: SchedulerSettings,
}

impl CronScheduler {
    pub fn new(
        workers: Vec<Arc<ChainWorker<RpcSource>>>,
        storage: Arc<dyn Storage>,
        profiles: Arc<dyn ProfileStore>,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            workers,
            storage,
            profiles,
            settings,
        }
    }

    /// Starts the cron scheduler and runs until cancellation.
    pub async fn run(&self, cancellation_token: CancellationToken) -> Result<()> {
        let mut scheduler = JobScheduler::new().await?;

        for worker in &self.workers {
            self.register_chain_update_job(&scheduler, worker.clone())
                .await?;
        }
        self.register_player_update_job(&scheduler).await?;

        scheduler.start().await?;
        info!(
            "Cron scheduler started with {} jobs",
            self.workers.len() + 1
        );

        cancellation_token.cancelled().await;
        info!("Cron scheduler shutting down...");

        scheduler.shutdown().await?;
        Ok(())
    }

    async fn register_chain_update_job(
        &self,
        scheduler: &JobScheduler,
        worker: Arc<ChainWorker<RpcSource>>,
    ) -> Result<()> {
        let interval = self.settings.chain_update_interval_secs;
        let chain = worker.chain_name().to_string();

        let job = Job::new_repeated_async(
            std::time::Duration::from_secs(interval),
            move |_uuid, _lock| {
                let worker = worker.clone();
                Box::pin(async move {
                    if let Err(e) = jobs::chain_update::run(&worker).await {
                        error!("Chain update failed for {}: {:#}", worker.chain_name(), e);
                    }
                })
            },
        )?;

        scheduler.add(job).await?;
        info!("Registered chain_update job for {chain} (every {interval}s)");
        Ok(())
    }

    async fn register_player_update_job(&self, scheduler: &JobScheduler) -> Result<()> {
        let interval = self.settings.player_update_interval_secs;
        let storage = self.storage.clone();
        let profiles = self.profiles.clone();
        let chains: Vec<String> = self
            .workers
            .iter()
            .map(|worker| worker.chain_name().to_string())
            .collect();

        let job = Job::new_repeated_async(
            std::time::Duration::from_secs(interval),
            move |_uuid, _lock| {
                let storage = storage.clone();
                let profiles = profiles.clone();
                let chains = chains.clone();
                Box::pin(async move {
                    if let Err(e) =
                        jobs::player_update::run(storage.as_ref(), profiles.as_ref(), &chains).await
                    {
                        error!("Player aggregation failed: {:#}", e);
                    }
                })
            },
        )?;

        scheduler.add(job).await?;
        info!("Registered player_update job (every {interval}s)");
        Ok(())
    }
}
