//! Blob storage for checkpointed datasets.
//!
//! One JSON object per (chain, entity) pair under `{chain}/{entity}.json`.
//! The [`Storage`] trait is the seam to the actual blob store; the default
//! implementation is a plain filesystem tree. All dataset writes for one
//! pipeline run go through a [`StagedRun`] so a chain's checkpoints advance
//! together or not at all.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::Dataset;

/// Entity names used in blob keys and API routes.
pub mod entity {
    pub const DEPOSITS: &str = "deposits";
    pub const WITHDRAWALS: &str = "withdrawals";
    pub const CLAIMS: &str = "claims";
    pub const BALANCES: &str = "balances";
    pub const YIELD: &str = "yield";
    pub const SUPPLY: &str = "supply";
    pub const DELEGATIONS_CREATED: &str = "delegationsCreated";
    pub const DELEGATIONS_FUNDED: &str = "delegationsFunded";
    pub const DELEGATIONS_UPDATED: &str = "delegationsUpdated";
    pub const DELEGATIONS_WITHDRAWN: &str = "delegationsWithdrawn";
    pub const WALLETS: &str = "wallets";
    pub const STATS: &str = "stats";
}

/// Blob key for a (chain, entity) dataset.
pub fn dataset_key(chain: &str, entity: &str) -> String {
    format!("{chain}/{entity}.json")
}

/// Raw blob read/write seam.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns None when the object does not exist.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// Filesystem-backed blob storage rooted at a directory.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read {}", path.display())),
        }
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .context(format!("Failed to write {}", path.display()))
    }
}

/// Load a prior dataset, treating absence as "entity not yet initialized".
///
/// Missing or unparseable datasets are skipped with a warning so one broken
/// blob cannot wedge the whole chain; `strict` turns both cases into hard
/// failures instead.
pub async fn read_dataset<T: DeserializeOwned>(
    storage: &dyn Storage,
    chain: &str,
    entity: &str,
    strict: bool,
) -> Result<Option<Dataset<T>>> {
    let key = dataset_key(chain, entity);
    let Some(bytes) = storage.read(&key).await? else {
        if strict {
            anyhow::bail!("Dataset {key} not found");
        }
        warn!("Could not find {key} in storage, skipping entity");
        return Ok(None);
    };
    match serde_json::from_slice(&bytes) {
        Ok(dataset) => Ok(Some(dataset)),
        Err(e) if strict => Err(e).context(format!("Failed to parse {key}")),
        Err(e) => {
            warn!("Failed to parse {key}: {e}, skipping entity");
            Ok(None)
        }
    }
}

/// Buffered dataset writes for one per-chain run.
///
/// Nothing reaches storage until [`StagedRun::commit`] runs, which only
/// happens after every pipeline step has succeeded. A failed step drops the
/// stage entirely and the next scheduled run repeats the block range from
/// the prior checkpoints.
pub struct StagedRun {
    chain: String,
    writes: Vec<(String, Vec<u8>)>,
}

impl StagedRun {
    pub fn new(chain: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            writes: Vec::new(),
        }
    }

    pub fn stage<T: Serialize>(&mut self, entity: &str, dataset: &Dataset<T>) -> Result<()> {
        let key = dataset_key(&self.chain, entity);
        let bytes = serde_json::to_vec_pretty(dataset).context(format!("Failed to encode {key}"))?;
        self.writes.push((key, bytes));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub async fn commit(self, storage: &dyn Storage) -> Result<()> {
        for (key, bytes) in self.writes {
            storage.write(&key, &bytes).await?;
        }
        Ok(())
    }
}

/// In-memory storage used by tests.
#[cfg(test)]
pub struct MemoryStorage {
    objects: std::sync::Mutex<std::collections::HashMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            objects: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[cfg(test)]
#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Deposit;

    #[test]
    fn test_dataset_key_convention() {
        assert_eq!(dataset_key("eth", entity::DEPOSITS), "eth/deposits.json");
        assert_eq!(
            dataset_key("poly", entity::DELEGATIONS_CREATED),
            "poly/delegationsCreated.json"
        );
    }

    #[tokio::test]
    async fn test_missing_dataset_is_skipped() {
        let storage = MemoryStorage::new();
        let ds = read_dataset::<Deposit>(&storage, "eth", entity::DEPOSITS, false)
            .await
            .unwrap();
        assert!(ds.is_none());
    }

    #[tokio::test]
    async fn test_missing_dataset_fails_in_strict_mode() {
        let storage = MemoryStorage::new();
        let res = read_dataset::<Deposit>(&storage, "eth", entity::DEPOSITS, true).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_staged_commit_round_trip() {
        let storage = MemoryStorage::new();
        let mut staged = StagedRun::new("eth");
        let mut dataset: Dataset<Deposit> = Dataset::new(100);
        dataset.data.push(Deposit {
            tx_hash: "0x1".to_string(),
            block: 50,
            timestamp: Some(1_700_000_000),
            wallet: "0xa".to_string(),
            amount: 12.5,
        });
        staged.stage(entity::DEPOSITS, &dataset).unwrap();
        assert_eq!(staged.len(), 1);
        staged.commit(&storage).await.unwrap();

        let loaded = read_dataset::<Deposit>(&storage, "eth", entity::DEPOSITS, true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.last_queried_block, 100);
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].amount, 12.5);
    }
}
