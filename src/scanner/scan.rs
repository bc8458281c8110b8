use std::time::Duration;

use alloy::rpc::types::Log;

use super::error::RangeQueryError;
use super::source::{ChainSource, EventQuery};

/// Maximum attempts per sub-range query
const MAX_ATTEMPTS: u32 = 3;

/// Delay between retries (exponential backoff base)
const RETRY_DELAY_MS: u64 = 250;

/// Fetch all logs for one event over `(start_block_exclusive, end_block_inclusive]`.
///
/// The range is walked in consecutive sub-ranges no larger than `page_size`,
/// one log query each. `start_block_exclusive` is always the prior
/// checkpoint, so an already-committed block is never re-queried.
pub async fn scan<S: ChainSource + ?Sized>(
    source: &S,
    query: &EventQuery,
    page_size: u64,
    start_block_exclusive: u64,
    end_block_inclusive: u64,
) -> Result<Vec<Log>, RangeQueryError> {
    let mut logs = Vec::new();
    if end_block_inclusive <= start_block_exclusive {
        return Ok(logs);
    }

    let page_size = page_size.max(1);
    let mut from = start_block_exclusive + 1;
    while from <= end_block_inclusive {
        let to = (from + page_size - 1).min(end_block_inclusive);
        let page = scan_page(source, query, from, to).await?;
        logs.extend(page);
        from = to + 1;
    }

    Ok(logs)
}

async fn scan_page<S: ChainSource + ?Sized>(
    source: &S,
    query: &EventQuery,
    from: u64,
    to: u64,
) -> Result<Vec<Log>, RangeQueryError> {
    let mut last_err = None;

    for attempt in 0..MAX_ATTEMPTS {
        match source.get_logs(query, from, to).await {
            Ok(logs) => return Ok(logs),
            Err(e) => {
                last_err = Some(e);
                if attempt < MAX_ATTEMPTS - 1 {
                    let delay = Duration::from_millis(RETRY_DELAY_MS * 2_u64.pow(attempt));
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(RangeQueryError {
        address: format!("{:#x}", query.address),
        event: query.event,
        from,
        to,
        attempts: MAX_ATTEMPTS,
        cause: last_err.expect("at least one attempt was made"),
    })
}
