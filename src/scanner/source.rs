use std::time::Duration;

use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder, MULTICALL3_ADDRESS};
use alloy::rpc::types::{Filter, Log};
use alloy::sol_types::{SolCall, SolEvent};
use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

use crate::abis::multicall::{Call3, IMulticall3};
use crate::abis::IERC20;

/// Timeout for individual RPC calls (30 seconds)
const RPC_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// One contract event to query, with context for error reporting.
#[derive(Debug, Clone)]
pub struct EventQuery {
    pub address: Address,
    pub event: &'static str,
    pub topic0: B256,
}

impl EventQuery {
    pub fn of<E: SolEvent>(address: Address) -> Self {
        Self {
            address,
            event: E::SIGNATURE,
            topic0: E::SIGNATURE_HASH,
        }
    }
}

/// Read-only chain access used by the indexing pipeline.
///
/// The live implementation is [`RpcSource`]; tests substitute an in-memory
/// fixture so extraction semantics can be exercised without a node.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Latest block number observed at scan time.
    async fn head_block(&self) -> Result<u64>;

    /// Logs for one event over one inclusive sub-range.
    async fn get_logs(&self, query: &EventQuery, from: u64, to: u64) -> Result<Vec<Log>>;

    /// Timestamp of a block.
    async fn block_timestamp(&self, block: u64) -> Result<u64>;

    /// Token balances of many holders at a block, aligned with `holders`.
    /// Implementations issue one batched request per call.
    async fn balance_of_batch(
        &self,
        token: Address,
        holders: &[Address],
        block: u64,
    ) -> Result<Vec<U256>>;

    /// Token balance of a single holder at a block.
    async fn balance_of(&self, token: Address, holder: Address, block: u64) -> Result<U256>;

    /// Total token supply at a block.
    async fn total_supply(&self, token: Address, block: u64) -> Result<U256>;
}

/// JSON-RPC backed chain source.
pub struct RpcSource {
    provider: DynProvider,
}

impl RpcSource {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = Url::parse(rpc_url).context("Invalid RPC URL")?;

        let client = ProviderBuilder::new().connect_http(url);
        let provider = DynProvider::new(client);

        Ok(Self { provider })
    }
}

#[async_trait]
impl ChainSource for RpcSource {
    async fn head_block(&self) -> Result<u64> {
        let block = tokio::time::timeout(RPC_CALL_TIMEOUT, async {
            self.provider.get_block_number().await
        })
        .await
        .context("Head block timeout")?
        .context("Failed to fetch head block")?;
        Ok(block)
    }

    async fn get_logs(&self, query: &EventQuery, from: u64, to: u64) -> Result<Vec<Log>> {
        let filter = Filter::new()
            .address(query.address)
            .event_signature(query.topic0)
            .from_block(from)
            .to_block(to);

        let logs = tokio::time::timeout(RPC_CALL_TIMEOUT, async {
            self.provider.get_logs(&filter).await
        })
        .await
        .context("Log query timeout")?
        .context("Log query failed")?;
        Ok(logs)
    }

    async fn block_timestamp(&self, block: u64) -> Result<u64> {
        let header = tokio::time::timeout(RPC_CALL_TIMEOUT, async {
            self.provider.get_block_by_number(block.into()).await
        })
        .await
        .context("Block lookup timeout")?
        .context("Block lookup failed")?
        .with_context(|| format!("Block {block} not found"))?;
        Ok(header.header.timestamp)
    }

    async fn balance_of_batch(
        &self,
        token: Address,
        holders: &[Address],
        block: u64,
    ) -> Result<Vec<U256>> {
        let erc20 = IERC20::new(token, &self.provider);
        let multicall = IMulticall3::new(MULTICALL3_ADDRESS, &self.provider);

        let calls: Vec<Call3> = holders
            .iter()
            .map(|holder| Call3 {
                target: token,
                allowFailure: true,
                callData: erc20.balanceOf(*holder).calldata().to_vec().into(),
            })
            .collect();

        let results = tokio::time::timeout(
            RPC_CALL_TIMEOUT,
            multicall
                .aggregate3(calls)
                .block(block.into())
                .call(),
        )
        .await
        .context("Multicall timeout")?
        .context("Multicall aggregate3 failed")?;

        // Failed individual calls decode as zero balance
        let balances = results
            .iter()
            .map(|res| {
                if res.success {
                    IERC20::balanceOfCall::abi_decode_returns(&res.returnData)
                        .unwrap_or(U256::ZERO)
                } else {
                    U256::ZERO
                }
            })
            .collect();

        Ok(balances)
    }

    async fn balance_of(&self, token: Address, holder: Address, block: u64) -> Result<U256> {
        let erc20 = IERC20::new(token, &self.provider);
        let balance = tokio::time::timeout(
            RPC_CALL_TIMEOUT,
            erc20.balanceOf(holder).block(block.into()).call(),
        )
        .await
        .context("balanceOf timeout")?
        .context("balanceOf call failed")?;
        Ok(balance)
    }

    async fn total_supply(&self, token: Address, block: u64) -> Result<U256> {
        let erc20 = IERC20::new(token, &self.provider);
        let supply = tokio::time::timeout(
            RPC_CALL_TIMEOUT,
            erc20.totalSupply().block(block.into()).call(),
        )
        .await
        .context("totalSupply timeout")?
        .context("totalSupply call failed")?;
        Ok(supply)
    }
}
