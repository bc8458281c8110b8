pub mod abis;
pub mod api;
pub mod config;
pub mod cron;
pub mod models;
pub mod player;
pub mod scanner;
pub mod stats;
pub mod storage;
pub mod utils;
pub mod worker;

pub use config::Settings;
pub use cron::CronScheduler;
pub use player::{FsProfileStore, ProfileStore};
pub use scanner::{ChainSource, RpcSource, TimestampCache};
pub use storage::{FsStorage, Storage};
pub use worker::ChainWorker;
