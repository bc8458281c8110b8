//! Per-entity event extractors.
//!
//! Every extractor advances one checkpointed dataset: it computes the
//! invocation's effective end block from the prior checkpoint and the
//! chain's block budget, scans the entity's event over the remaining range,
//! maps raw logs into records, and moves the checkpoint to the effective
//! end. Extraction never re-reads committed blocks, so append-only entities
//! need no deduplication; claims are the one merged entity (by tx hash).

use alloy::primitives::Address;
use alloy::sol_types::SolEvent;
use anyhow::Result;
use log::warn;

use crate::abis::{flush, prize_distributor, prize_pool, twab_delegator};
use crate::models::claim::scale_prize;
use crate::models::{
    Claim, Dataset, DelegationCreated, DelegationFunded, DelegationUpdated, DelegationWithdrawn,
    Deposit, Supply, Withdrawal, YieldCapture,
};
use crate::scanner::{scan, ChainSource, EventQuery, TimestampCache};
use crate::utils::{hex_encode, u256_to_f64};

/// Scan parameters shared by every extractor of one chain run.
#[derive(Debug, Clone, Copy)]
pub struct ScanParams {
    pub rpc_limit: u64,
    pub max_blocks_per_runtime: u64,
    pub decimals: u8,
}

/// End block for this invocation: the target, bounded by the per-run block
/// budget, and never behind the prior checkpoint.
pub fn effective_end_block(
    last_queried_block: u64,
    target_end_block: u64,
    max_blocks_per_runtime: u64,
) -> u64 {
    target_end_block
        .min(last_queried_block.saturating_add(max_blocks_per_runtime))
        .max(last_queried_block)
}

/// Scan one event over `(start, end]` and decode each log alongside its
/// block, transaction hash, and cached timestamp.
async fn scan_events<S, E>(
    source: &S,
    params: &ScanParams,
    address: Address,
    cache: &mut TimestampCache,
    start_block_exclusive: u64,
    end_block_inclusive: u64,
) -> Result<Vec<(E, u64, String, Option<u64>)>>
where
    S: ChainSource + ?Sized,
    E: SolEvent,
{
    let query = EventQuery::of::<E>(address);
    let logs = scan(
        source,
        &query,
        params.rpc_limit,
        start_block_exclusive,
        end_block_inclusive,
    )
    .await?;

    let mut events = Vec::with_capacity(logs.len());
    for log in logs {
        let decoded = match log.log_decode::<E>() {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Skipping undecodable {} log: {e}", query.event);
                continue;
            }
        };
        let block = log.block_number.unwrap_or_default();
        let tx_hash = log
            .transaction_hash
            .map(|hash| hex_encode(hash.as_slice()))
            .unwrap_or_default();
        // Records keep an absent timestamp rather than failing the run when
        // a single block lookup misbehaves
        let timestamp = match cache.resolve(source, block).await {
            Ok(ts) => Some(ts),
            Err(e) => {
                warn!("Could not resolve timestamp for block {block}: {e}");
                None
            }
        };
        events.push((decoded.inner.data, block, tx_hash, timestamp));
    }

    Ok(events)
}

pub async fn extract_deposits<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    prize_pool: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<Deposit>,
    target_end_block: u64,
) -> Result<Dataset<Deposit>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let events = scan_events::<_, prize_pool::Deposited>(
        source,
        params,
        prize_pool,
        cache,
        dataset.last_queried_block,
        end,
    )
    .await?;
    for (event, block, tx_hash, timestamp) in events {
        dataset
            .data
            .push(Deposit::from_event(event, block, tx_hash, timestamp, params.decimals));
    }
    dataset.last_queried_block = end;
    Ok(dataset)
}

pub async fn extract_withdrawals<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    prize_pool: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<Withdrawal>,
    target_end_block: u64,
) -> Result<Dataset<Withdrawal>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let events = scan_events::<_, prize_pool::Withdrawal>(
        source,
        params,
        prize_pool,
        cache,
        dataset.last_queried_block,
        end,
    )
    .await?;
    for (event, block, tx_hash, timestamp) in events {
        dataset
            .data
            .push(Withdrawal::from_event(event, block, tx_hash, timestamp, params.decimals));
    }
    dataset.last_queried_block = end;
    Ok(dataset)
}

pub async fn extract_claims<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    prize_distributor: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<Claim>,
    target_end_block: u64,
) -> Result<Dataset<Claim>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let events = scan_events::<_, prize_distributor::ClaimedDraw>(
        source,
        params,
        prize_distributor,
        cache,
        dataset.last_queried_block,
        end,
    )
    .await?;
    for (event, block, tx_hash, timestamp) in events {
        // One claim per transaction: a multi-draw claim emits several payout
        // logs under the same hash, which extend the existing record
        if let Some(existing) = dataset.data.iter_mut().find(|c| c.tx_hash == tx_hash) {
            existing.prizes.push(scale_prize(event.payout, params.decimals));
        } else {
            dataset
                .data
                .push(Claim::from_event(event, block, tx_hash, timestamp, params.decimals));
        }
    }
    dataset.last_queried_block = end;
    Ok(dataset)
}

pub async fn extract_yield<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    flush: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<YieldCapture>,
    target_end_block: u64,
) -> Result<Dataset<YieldCapture>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let events = scan_events::<_, flush::Flushed>(
        source,
        params,
        flush,
        cache,
        dataset.last_queried_block,
        end,
    )
    .await?;
    for (event, block, tx_hash, timestamp) in events {
        dataset
            .data
            .push(YieldCapture::from_event(event, block, tx_hash, timestamp, params.decimals));
    }
    dataset.last_queried_block = end;
    Ok(dataset)
}

/// Supply is state-driven, not log-driven: one snapshot of the reserve
/// asset held by the yield source and the outstanding ticket supply is
/// appended per run, both read at the effective end block.
pub async fn extract_supply<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    ticket: Address,
    reserve_asset: Address,
    yield_source: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<Supply>,
    target_end_block: u64,
) -> Result<Dataset<Supply>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let reserve = source.balance_of(reserve_asset, yield_source, end).await?;
    let tickets = source.total_supply(ticket, end).await?;
    let timestamp = match cache.resolve(source, end).await {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!("Could not resolve timestamp for block {end}: {e}");
            None
        }
    };
    dataset.data.push(Supply {
        block: end,
        timestamp,
        reserve: u256_to_f64(reserve, params.decimals),
        tickets: u256_to_f64(tickets, params.decimals),
    });
    dataset.last_queried_block = end;
    Ok(dataset)
}

pub async fn extract_delegations_created<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    delegator: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<DelegationCreated>,
    target_end_block: u64,
) -> Result<Dataset<DelegationCreated>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let events = scan_events::<_, twab_delegator::DelegationCreated>(
        source,
        params,
        delegator,
        cache,
        dataset.last_queried_block,
        end,
    )
    .await?;
    for (event, block, tx_hash, timestamp) in events {
        dataset
            .data
            .push(DelegationCreated::from_event(event, block, tx_hash, timestamp));
    }
    dataset.last_queried_block = end;
    Ok(dataset)
}

pub async fn extract_delegations_funded<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    delegator: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<DelegationFunded>,
    target_end_block: u64,
) -> Result<Dataset<DelegationFunded>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let events = scan_events::<_, twab_delegator::DelegationFunded>(
        source,
        params,
        delegator,
        cache,
        dataset.last_queried_block,
        end,
    )
    .await?;
    for (event, block, tx_hash, timestamp) in events {
        dataset.data.push(DelegationFunded::from_event(
            event,
            block,
            tx_hash,
            timestamp,
            params.decimals,
        ));
    }
    dataset.last_queried_block = end;
    Ok(dataset)
}

pub async fn extract_delegations_updated<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    delegator: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<DelegationUpdated>,
    target_end_block: u64,
) -> Result<Dataset<DelegationUpdated>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let events = scan_events::<_, twab_delegator::DelegateeUpdated>(
        source,
        params,
        delegator,
        cache,
        dataset.last_queried_block,
        end,
    )
    .await?;
    for (event, block, tx_hash, timestamp) in events {
        dataset
            .data
            .push(DelegationUpdated::from_event(event, block, tx_hash, timestamp));
    }
    dataset.last_queried_block = end;
    Ok(dataset)
}

pub async fn extract_delegations_withdrawn<S: ChainSource + ?Sized>(
    source: &S,
    params: &ScanParams,
    delegator: Address,
    cache: &mut TimestampCache,
    mut dataset: Dataset<DelegationWithdrawn>,
    target_end_block: u64,
) -> Result<Dataset<DelegationWithdrawn>> {
    let end = effective_end_block(
        dataset.last_queried_block,
        target_end_block,
        params.max_blocks_per_runtime,
    );
    let events = scan_events::<_, twab_delegator::TransferredDelegation>(
        source,
        params,
        delegator,
        cache,
        dataset.last_queried_block,
        end,
    )
    .await?;
    for (event, block, tx_hash, timestamp) in events {
        dataset.data.push(DelegationWithdrawn::from_event(
            event,
            block,
            tx_hash,
            timestamp,
            params.decimals,
        ));
    }
    dataset.last_queried_block = end;
    Ok(dataset)
}
