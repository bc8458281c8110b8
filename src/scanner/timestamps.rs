use anyhow::Result;
use rustc_hash::FxHashMap;

use super::source::ChainSource;

/// Block-number → timestamp memoization for one scan session.
///
/// Scoped to a single chain and a single invocation: the cache is created at
/// the start of a run, threaded through every extractor, and dropped with
/// the run. Many events share a block, so most lookups after the first are
/// hits.
#[derive(Debug, Default)]
pub struct TimestampCache {
    entries: FxHashMap<u64, u64>,
}

impl TimestampCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached timestamp for a block, issuing one lookup on a miss.
    pub async fn resolve<S: ChainSource + ?Sized>(
        &mut self,
        source: &S,
        block: u64,
    ) -> Result<u64> {
        if let Some(&timestamp) = self.entries.get(&block) {
            return Ok(timestamp);
        }
        let timestamp = source.block_timestamp(block).await?;
        self.entries.insert(block, timestamp);
        Ok(timestamp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
