mod config;

pub use config::{
    ChainSettings, ContractSettings, SchedulerSettings, Settings, StatsSettings, StorageSettings,
};
