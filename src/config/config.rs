use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Blob storage configuration.
///
/// Datasets are persisted as one JSON object per (chain, entity) pair under
/// `{root}/{chain}/{entity}.json`, with player profiles under
/// `{root}/players/`.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// When true, a missing or unreadable prior dataset fails the run instead
    /// of skipping that entity with a warning.
    #[serde(default)]
    pub strict_datasets: bool,
}

fn default_storage_root() -> String {
    "data".to_string()
}

/// Statistics aggregation configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StatsSettings {
    /// Lower bound of every chain-stats time window (protocol launch).
    #[serde(default = "default_min_timestamp")]
    pub min_timestamp: u64,
}

fn default_min_timestamp() -> u64 {
    1_634_270_000
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            min_timestamp: default_min_timestamp(),
        }
    }
}

/// Scheduler configuration.
///
/// One recurring dataset-update job per chain, plus a single cross-chain
/// player-aggregation job offset behind them so it always sees fresh wallet
/// graphs.
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerSettings {
    #[serde(default = "default_chain_update_interval")]
    pub chain_update_interval_secs: u64,
    #[serde(default = "default_player_update_interval")]
    pub player_update_interval_secs: u64,
}

fn default_chain_update_interval() -> u64 {
    10_800 // 3 hours
}

fn default_player_update_interval() -> u64 {
    21_600 // 6 hours
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            chain_update_interval_secs: default_chain_update_interval(),
            player_update_interval_secs: default_player_update_interval(),
        }
    }
}

/// Protocol contract addresses for one chain.
#[derive(Debug, Deserialize, Clone)]
pub struct ContractSettings {
    pub prize_pool: String,
    pub prize_distributor: String,
    pub delegator: String,
    pub ticket: String,
    pub flush: String,
    pub reserve_asset: String,
    pub yield_source: String,
}

/// Static per-chain configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ChainSettings {
    /// Short chain tag used in storage keys and logs (e.g. "eth", "poly").
    pub name: String,
    pub rpc_url: String,
    pub contracts: ContractSettings,
    /// Maximum block span of a single eth_getLogs query.
    #[serde(default = "default_rpc_limit")]
    pub rpc_limit: u64,
    /// Maximum blocks any one scheduled run may advance a checkpoint by.
    /// Keeps a run inside the invocation's wall-clock budget; the next run
    /// resumes from the new checkpoint.
    #[serde(default = "default_max_blocks_per_runtime")]
    pub max_blocks_per_runtime: u64,
    /// Decimals of the deposited asset; all amounts are scaled by 10^decimals.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Optional recency bound (seconds) on the balance-snapshot candidate
    /// set. Unset means every wallet ever seen is re-queried.
    #[serde(default)]
    pub recent_activity_window_secs: Option<u64>,
}

fn default_rpc_limit() -> u64 {
    100_000
}

fn default_max_blocks_per_runtime() -> u64 {
    500_000
}

fn default_decimals() -> u8 {
    6
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub storage: Option<StorageSettings>,
    #[serde(default)]
    pub stats: StatsSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    pub chains: Vec<ChainSettings>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }

    /// Storage settings with defaults applied when the section is omitted.
    pub fn storage(&self) -> StorageSettings {
        self.storage.clone().unwrap_or(StorageSettings {
            root: default_storage_root(),
            strict_datasets: false,
        })
    }
}
