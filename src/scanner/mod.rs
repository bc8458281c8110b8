//! Bounded, checkpoint-driven log scanning.
//!
//! [`scan`] walks a block range in pages no larger than the chain's RPC
//! limit, retrying each page a bounded number of times before failing the
//! whole scan with a [`RangeQueryError`]. [`ChainSource`] is the seam to the
//! actual RPC node; [`TimestampCache`] memoizes block timestamps for the
//! lifetime of one scan session.

mod error;
mod scan;
mod source;
mod timestamps;

pub use error::RangeQueryError;
pub use scan::scan;
pub use source::{ChainSource, EventQuery, RpcSource};
pub use timestamps::TimestampCache;

/// In-memory chain fixture used by scanner, extractor, and pipeline tests.
#[cfg(test)]
pub mod fixture {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use alloy::primitives::{Address, B256, U256};
    use alloy::rpc::types::Log;
    use alloy::sol_types::SolEvent;
    use anyhow::Result;
    use async_trait::async_trait;
    use rustc_hash::FxHashMap;

    use super::{ChainSource, EventQuery};

    /// Build an RPC-shaped log from a decoded event.
    pub fn make_log<E: SolEvent>(address: Address, event: &E, block: u64, tx_hash: B256) -> Log {
        let mut log = Log::default();
        log.inner.address = address;
        log.inner.data = event.encode_log_data();
        log.block_number = Some(block);
        log.transaction_hash = Some(tx_hash);
        log
    }

    /// Deterministic fake chain: logs, timestamps, balances, counters.
    #[derive(Default)]
    pub struct FixtureSource {
        pub head: u64,
        pub logs: Vec<Log>,
        pub timestamps: FxHashMap<u64, u64>,
        pub balances: HashMap<Address, U256>,
        pub supply: U256,
        /// Fail the next N get_logs calls before succeeding.
        pub fail_log_queries: AtomicU32,
        pub log_calls: AtomicU32,
        pub timestamp_calls: AtomicU32,
        /// Holder-count of every balance_of_batch call, in order.
        pub balance_batch_sizes: Mutex<Vec<usize>>,
    }

    impl FixtureSource {
        pub fn new(head: u64) -> Self {
            Self {
                head,
                ..Default::default()
            }
        }

        pub fn push_event<E: SolEvent>(
            &mut self,
            address: Address,
            event: &E,
            block: u64,
            tx_hash: B256,
        ) {
            self.logs.push(make_log(address, event, block, tx_hash));
        }

        pub fn set_timestamp(&mut self, block: u64, timestamp: u64) {
            self.timestamps.insert(block, timestamp);
        }
    }

    #[async_trait]
    impl ChainSource for FixtureSource {
        async fn head_block(&self) -> Result<u64> {
            Ok(self.head)
        }

        async fn get_logs(&self, query: &EventQuery, from: u64, to: u64) -> Result<Vec<Log>> {
            self.log_calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.fail_log_queries.load(Ordering::SeqCst);
            if remaining > 0 {
                self.fail_log_queries.store(remaining - 1, Ordering::SeqCst);
                anyhow::bail!("injected RPC failure");
            }
            Ok(self
                .logs
                .iter()
                .filter(|log| {
                    log.inner.address == query.address
                        && log.inner.data.topics().first() == Some(&query.topic0)
                        && log
                            .block_number
                            .map(|b| b >= from && b <= to)
                            .unwrap_or(false)
                })
                .cloned()
                .collect())
        }

        async fn block_timestamp(&self, block: u64) -> Result<u64> {
            self.timestamp_calls.fetch_add(1, Ordering::SeqCst);
            self.timestamps
                .get(&block)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("no timestamp for block {block}"))
        }

        async fn balance_of_batch(
            &self,
            _token: Address,
            holders: &[Address],
            _block: u64,
        ) -> Result<Vec<U256>> {
            self.balance_batch_sizes.lock().unwrap().push(holders.len());
            Ok(holders
                .iter()
                .map(|holder| self.balances.get(holder).copied().unwrap_or(U256::ZERO))
                .collect())
        }

        async fn balance_of(&self, _token: Address, holder: Address, _block: u64) -> Result<U256> {
            Ok(self.balances.get(&holder).copied().unwrap_or(U256::ZERO))
        }

        async fn total_supply(&self, _token: Address, _block: u64) -> Result<U256> {
            Ok(self.supply)
        }
    }
}
