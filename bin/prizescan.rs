use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use jemallocator::Jemalloc;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use prizescan::{
    ChainWorker, CronScheduler, FsProfileStore, FsStorage, ProfileStore, Settings, Storage,
};

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    // Load configuration
    let settings = Settings::new()
        .context("Failed to load config.yaml. Please ensure it exists and is valid")?;

    let storage_settings = settings.storage();
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(&storage_settings.root));
    let profiles: Arc<dyn ProfileStore> = Arc::new(FsProfileStore::new(
        Path::new(&storage_settings.root).join("players"),
    ));

    // One worker per configured chain; runs are scheduled independently
    let mut workers = Vec::with_capacity(settings.chains.len());
    for chain in settings.chains.clone() {
        let name = chain.name.clone();
        let worker = ChainWorker::new(
            chain,
            storage.clone(),
            settings.stats.clone(),
            storage_settings.strict_datasets,
        )
        .context(format!("Failed to initialize worker for chain {name}"))?;
        workers.push(Arc::new(worker));
        info!("Initialized worker for chain {name}");
    }

    let cancellation_token = CancellationToken::new();

    let cron_scheduler = CronScheduler::new(
        workers,
        storage,
        profiles,
        settings.scheduler.clone(),
    );

    let cron_token = cancellation_token.child_token();
    let cron_handle = tokio::spawn(async move {
        if let Err(e) = cron_scheduler.run(cron_token).await {
            error!("Cron scheduler failed: {:#}", e);
        }
    });

    info!("Cron scheduler started - indexing jobs will run periodically");

    #[cfg(unix)]
    let mut sigterm_stream = {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?
    };

    info!("Indexer running. Press Ctrl+C to stop.");

    #[cfg(unix)]
    {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
            },
            _ = sigterm_stream.recv() => {
                info!("Received SIGTERM, exiting gracefully...");
            },
        };
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
            },
        };
    }

    info!("Finishing all tasks...");

    cancellation_token.cancel();

    info!("Waiting for cron scheduler to stop...");
    let _ = cron_handle.await;

    info!("Scheduler stopped");
    Ok(())
}
