use std::sync::Arc;
use std::time::Instant;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};

use crate::config::{ChainSettings, ContractSettings, StatsSettings};
use crate::models::{
    Balance, Claim, Dataset, DelegationCreated, DelegationFunded, DelegationUpdated,
    DelegationWithdrawn, Deposit, Supply, WalletEntry, Withdrawal, YieldCapture,
};
use crate::scanner::{ChainSource, RpcSource, TimestampCache};
use crate::stats::{aggregate, StatsInputs};
use crate::storage::{entity, read_dataset, StagedRun, Storage};

use super::balances::snapshot_balances;
use super::extractors::{self, ScanParams};
use super::wallets::build_wallet_graph;

/// Parsed protocol contract addresses for one chain.
struct Contracts {
    prize_pool: Address,
    prize_distributor: Address,
    delegator: Address,
    ticket: Address,
    flush: Address,
    reserve_asset: Address,
    yield_source: Address,
}

impl Contracts {
    fn parse(settings: &ContractSettings) -> Result<Self> {
        let parse = |name: &str, value: &str| -> Result<Address> {
            value
                .parse()
                .context(format!("Invalid {name} address: {value}"))
        };
        Ok(Self {
            prize_pool: parse("prize_pool", &settings.prize_pool)?,
            prize_distributor: parse("prize_distributor", &settings.prize_distributor)?,
            delegator: parse("delegator", &settings.delegator)?,
            ticket: parse("ticket", &settings.ticket)?,
            flush: parse("flush", &settings.flush)?,
            reserve_asset: parse("reserve_asset", &settings.reserve_asset)?,
            yield_source: parse("yield_source", &settings.yield_source)?,
        })
    }
}

/// Indexing pipeline for a single chain.
///
/// One scheduled invocation runs every step in a fixed sequence (event
/// extraction, balance snapshot, wallet graph, stats) against in-memory
/// copies of the datasets, then commits every updated dataset together.
/// If any step fails nothing is persisted, and the next run repeats the
/// same block range from the prior checkpoints.
pub struct ChainWorker<S: ChainSource> {
    chain: ChainSettings,
    contracts: Contracts,
    source: S,
    storage: Arc<dyn Storage>,
    stats: StatsSettings,
    strict_datasets: bool,
}

impl ChainWorker<RpcSource> {
    pub fn new(
        chain: ChainSettings,
        storage: Arc<dyn Storage>,
        stats: StatsSettings,
        strict_datasets: bool,
    ) -> Result<Self> {
        let source = RpcSource::new(&chain.rpc_url)
            .context(format!("Failed to create RPC source for chain {}", chain.name))?;
        Self::with_source(chain, source, storage, stats, strict_datasets)
    }
}

impl<S: ChainSource> ChainWorker<S> {
    pub fn with_source(
        chain: ChainSettings,
        source: S,
        storage: Arc<dyn Storage>,
        stats: StatsSettings,
        strict_datasets: bool,
    ) -> Result<Self> {
        let contracts = Contracts::parse(&chain.contracts)
            .context(format!("Invalid contract addresses for chain {}", chain.name))?;
        Ok(Self {
            chain,
            contracts,
            source,
            storage,
            stats,
            strict_datasets,
        })
    }

    pub fn chain_name(&self) -> &str {
        &self.chain.name
    }

    /// Run the full pipeline once, committing all updated datasets together.
    pub async fn run_once(&self) -> Result<()> {
        let started = Instant::now();
        let chain = self.chain.name.clone();
        let storage = self.storage.as_ref();
        let strict = self.strict_datasets;

        let head = self.source.head_block().await?;
        let mut cache = TimestampCache::new();
        let params = ScanParams {
            rpc_limit: self.chain.rpc_limit,
            max_blocks_per_runtime: self.chain.max_blocks_per_runtime,
            decimals: self.chain.decimals,
        };

        info!("{chain}: starting run at head block {head}");

        let deposits = match read_dataset::<Deposit>(storage, &chain, entity::DEPOSITS, strict)
            .await?
        {
            Some(prior) => Some(
                extractors::extract_deposits(
                    &self.source,
                    &params,
                    self.contracts.prize_pool,
                    &mut cache,
                    prior,
                    head,
                )
                .await?,
            ),
            None => None,
        };

        let withdrawals =
            match read_dataset::<Withdrawal>(storage, &chain, entity::WITHDRAWALS, strict).await? {
                Some(prior) => Some(
                    extractors::extract_withdrawals(
                        &self.source,
                        &params,
                        self.contracts.prize_pool,
                        &mut cache,
                        prior,
                        head,
                    )
                    .await?,
                ),
                None => None,
            };

        let claims = match read_dataset::<Claim>(storage, &chain, entity::CLAIMS, strict).await? {
            Some(prior) => Some(
                extractors::extract_claims(
                    &self.source,
                    &params,
                    self.contracts.prize_distributor,
                    &mut cache,
                    prior,
                    head,
                )
                .await?,
            ),
            None => None,
        };

        // Balances are read at the deposits checkpoint, which may lag the
        // head when the run is budget-limited
        let balances = match (&deposits, &withdrawals, &claims) {
            (Some(deposits), Some(withdrawals), Some(claims)) => {
                match read_dataset::<Balance>(storage, &chain, entity::BALANCES, strict).await? {
                    Some(prior) => Some(
                        snapshot_balances(
                            &self.source,
                            self.contracts.ticket,
                            deposits.last_queried_block,
                            params.decimals,
                            self.chain.recent_activity_window_secs,
                            &deposits.data,
                            &withdrawals.data,
                            &claims.data,
                            prior,
                        )
                        .await?,
                    ),
                    None => None,
                }
            }
            _ => {
                warn!("{chain}: balance snapshot skipped, missing upstream event datasets");
                None
            }
        };

        let yields = match read_dataset::<YieldCapture>(storage, &chain, entity::YIELD, strict)
            .await?
        {
            Some(prior) => Some(
                extractors::extract_yield(
                    &self.source,
                    &params,
                    self.contracts.flush,
                    &mut cache,
                    prior,
                    head,
                )
                .await?,
            ),
            None => None,
        };

        let supply = match read_dataset::<Supply>(storage, &chain, entity::SUPPLY, strict).await? {
            Some(prior) => Some(
                extractors::extract_supply(
                    &self.source,
                    &params,
                    self.contracts.ticket,
                    self.contracts.reserve_asset,
                    self.contracts.yield_source,
                    &mut cache,
                    prior,
                    head,
                )
                .await?,
            ),
            None => None,
        };

        let delegations_created = match read_dataset::<DelegationCreated>(
            storage,
            &chain,
            entity::DELEGATIONS_CREATED,
            strict,
        )
        .await?
        {
            Some(prior) => Some(
                extractors::extract_delegations_created(
                    &self.source,
                    &params,
                    self.contracts.delegator,
                    &mut cache,
                    prior,
                    head,
                )
                .await?,
            ),
            None => None,
        };

        let delegations_funded = match read_dataset::<DelegationFunded>(
            storage,
            &chain,
            entity::DELEGATIONS_FUNDED,
            strict,
        )
        .await?
        {
            Some(prior) => Some(
                extractors::extract_delegations_funded(
                    &self.source,
                    &params,
                    self.contracts.delegator,
                    &mut cache,
                    prior,
                    head,
                )
                .await?,
            ),
            None => None,
        };

        let delegations_updated = match read_dataset::<DelegationUpdated>(
            storage,
            &chain,
            entity::DELEGATIONS_UPDATED,
            strict,
        )
        .await?
        {
            Some(prior) => Some(
                extractors::extract_delegations_updated(
                    &self.source,
                    &params,
                    self.contracts.delegator,
                    &mut cache,
                    prior,
                    head,
                )
                .await?,
            ),
            None => None,
        };

        let delegations_withdrawn = match read_dataset::<DelegationWithdrawn>(
            storage,
            &chain,
            entity::DELEGATIONS_WITHDRAWN,
            strict,
        )
        .await?
        {
            Some(prior) => Some(
                extractors::extract_delegations_withdrawn(
                    &self.source,
                    &params,
                    self.contracts.delegator,
                    &mut cache,
                    prior,
                    head,
                )
                .await?,
            ),
            None => None,
        };

        // Aggregations need every upstream dataset; a run with gaps skips
        // them rather than producing partial graphs or stats
        let wallets = match (
            &balances,
            &deposits,
            &withdrawals,
            &claims,
            &delegations_created,
            &delegations_funded,
            &delegations_updated,
            &delegations_withdrawn,
        ) {
            (
                Some(balances),
                Some(deposits),
                Some(withdrawals),
                Some(claims),
                Some(created),
                Some(funded),
                Some(updated),
                Some(withdrawn),
            ) => Some(build_wallet_graph(
                &balances.data,
                &deposits.data,
                &withdrawals.data,
                &claims.data,
                &created.data,
                &funded.data,
                &updated.data,
                &withdrawn.data,
            )),
            _ => {
                warn!("{chain}: wallet graph skipped, missing upstream datasets");
                None
            }
        };

        let stats = match (
            &deposits,
            &withdrawals,
            &claims,
            &delegations_created,
            &delegations_funded,
            &delegations_withdrawn,
            &yields,
            &balances,
            &wallets,
        ) {
            (
                Some(deposits),
                Some(withdrawals),
                Some(claims),
                Some(created),
                Some(funded),
                Some(withdrawn),
                Some(yields),
                Some(balances),
                Some(wallets),
            ) => {
                let max_timestamp = cache
                    .resolve(&self.source, deposits.last_queried_block)
                    .await?;
                Some(aggregate(
                    self.stats.min_timestamp,
                    max_timestamp,
                    &StatsInputs {
                        deposits: &deposits.data,
                        withdrawals: &withdrawals.data,
                        claims: &claims.data,
                        delegations_created: &created.data,
                        delegations_funded: &funded.data,
                        delegations_withdrawn: &withdrawn.data,
                        yields: &yields.data,
                        balances: &balances.data,
                        wallets,
                    },
                ))
            }
            _ => {
                warn!("{chain}: stats aggregation skipped, missing upstream datasets");
                None
            }
        };

        // Stage everything that was produced, then commit all-or-nothing
        let now = Utc::now().timestamp();
        let mut staged = StagedRun::new(&chain);
        if let Some(dataset) = &deposits {
            staged.stage(entity::DEPOSITS, dataset)?;
        }
        if let Some(dataset) = &withdrawals {
            staged.stage(entity::WITHDRAWALS, dataset)?;
        }
        if let Some(dataset) = &claims {
            staged.stage(entity::CLAIMS, dataset)?;
        }
        if let Some(dataset) = &balances {
            staged.stage(entity::BALANCES, dataset)?;
        }
        if let Some(dataset) = &yields {
            staged.stage(entity::YIELD, dataset)?;
        }
        if let Some(dataset) = &supply {
            staged.stage(entity::SUPPLY, dataset)?;
        }
        if let Some(dataset) = &delegations_created {
            staged.stage(entity::DELEGATIONS_CREATED, dataset)?;
        }
        if let Some(dataset) = &delegations_funded {
            staged.stage(entity::DELEGATIONS_FUNDED, dataset)?;
        }
        if let Some(dataset) = &delegations_updated {
            staged.stage(entity::DELEGATIONS_UPDATED, dataset)?;
        }
        if let Some(dataset) = &delegations_withdrawn {
            staged.stage(entity::DELEGATIONS_WITHDRAWN, dataset)?;
        }
        if let Some(data) = wallets {
            let dataset = Dataset::<WalletEntry> {
                last_queried_block: balances
                    .as_ref()
                    .map(|b| b.last_queried_block)
                    .unwrap_or_default(),
                timestamp: Some(now),
                data,
            };
            staged.stage(entity::WALLETS, &dataset)?;
        }
        if let Some(stats) = stats {
            let dataset = Dataset {
                last_queried_block: deposits
                    .as_ref()
                    .map(|d| d.last_queried_block)
                    .unwrap_or_default(),
                timestamp: Some(now),
                data: vec![stats],
            };
            staged.stage(entity::STATS, &dataset)?;
        }

        let committed = staged.len();
        staged.commit(storage).await?;

        info!(
            "{chain}: run complete in {:?} ({committed} datasets committed, {} block timestamps cached)",
            started.elapsed(),
            cache.len()
        );
        Ok(())
    }
}
