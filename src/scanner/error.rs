use thiserror::Error;

/// A log sub-range query that kept failing after bounded retries.
///
/// Carries the full context of the failed query so the abort reason names
/// the contract, the event, and the exact block range. This error is never
/// swallowed: it fails the calling extractor and, with it, the whole
/// per-chain run (no checkpoint advances are persisted for that run).
#[derive(Debug, Error)]
#[error(
    "range query failed for {event} at {address} over blocks {from}-{to} after {attempts} attempts: {cause}"
)]
pub struct RangeQueryError {
    pub address: String,
    pub event: &'static str,
    pub from: u64,
    pub to: u64,
    pub attempts: u32,
    pub cause: anyhow::Error,
}
