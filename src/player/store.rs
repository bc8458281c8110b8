use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::models::PlayerData;

/// Player profile document store seam.
///
/// The pipeline only needs batched upserts and single-document lookups; the
/// default implementation keeps one JSON document per wallet on disk.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn save_profiles(&self, profiles: &[(String, PlayerData)]) -> Result<()>;
    async fn load_profile(&self, wallet: &str) -> Result<Option<PlayerData>>;
}

/// Filesystem-backed profile store, one `{wallet}.json` per player.
pub struct FsProfileStore {
    root: PathBuf,
}

impl FsProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, wallet: &str) -> PathBuf {
        self.root.join(format!("{wallet}.json"))
    }
}

#[async_trait]
impl ProfileStore for FsProfileStore {
    async fn save_profiles(&self, profiles: &[(String, PlayerData)]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .context(format!("Failed to create {}", self.root.display()))?;
        for (wallet, profile) in profiles {
            let path = self.path_for(wallet);
            let bytes = serde_json::to_vec_pretty(profile)
                .context(format!("Failed to encode profile for {wallet}"))?;
            tokio::fs::write(&path, bytes)
                .await
                .context(format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }

    async fn load_profile(&self, wallet: &str) -> Result<Option<PlayerData>> {
        let path = self.path_for(wallet);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let profile = serde_json::from_slice(&bytes)
                    .context(format!("Failed to parse {}", path.display()))?;
                Ok(Some(profile))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read {}", path.display())),
        }
    }
}

/// In-memory profile store used by tests.
#[cfg(test)]
pub struct MemoryProfileStore {
    pub profiles: std::sync::Mutex<std::collections::HashMap<String, PlayerData>>,
    pub batch_sizes: std::sync::Mutex<Vec<usize>>,
}

#[cfg(test)]
impl MemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(std::collections::HashMap::new()),
            batch_sizes: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn save_profiles(&self, profiles: &[(String, PlayerData)]) -> Result<()> {
        self.batch_sizes.lock().unwrap().push(profiles.len());
        let mut map = self.profiles.lock().unwrap();
        for (wallet, profile) in profiles {
            map.insert(wallet.clone(), profile.clone());
        }
        Ok(())
    }

    async fn load_profile(&self, wallet: &str) -> Result<Option<PlayerData>> {
        Ok(self.profiles.lock().unwrap().get(wallet).cloned())
    }
}
