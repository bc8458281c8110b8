//! Read-API data shaping.
//!
//! The HTTP layer itself lives outside this crate; these helpers produce
//! exactly the payloads it serves: paginated dataset views, the raw shape
//! for unpaginated entities, and the structurally-default profile returned
//! for wallets with no recorded activity.

use serde::Serialize;

use crate::models::{Dataset, PlayerData};
use crate::storage::entity;

/// Default page size for dataset views.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Entities served raw rather than paginated.
pub const UNPAGINATED_ENTITIES: [&str; 2] = [entity::STATS, entity::WALLETS];

/// One page of a checkpointed dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedView<T> {
    pub last_queried_block: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    pub page: usize,
    pub has_next_page: bool,
    pub data: Vec<T>,
}

/// Slice one page out of a dataset. Out-of-range pages yield an empty page
/// with `has_next_page` false.
pub fn paginate<T: Clone>(dataset: &Dataset<T>, page: usize, page_size: usize) -> PaginatedView<T> {
    let page_size = page_size.max(1);
    let start = page.saturating_mul(page_size).min(dataset.data.len());
    let end = start.saturating_add(page_size).min(dataset.data.len());
    PaginatedView {
        last_queried_block: dataset.last_queried_block,
        timestamp: dataset.timestamp,
        page,
        has_next_page: dataset.data.len() > end,
        data: dataset.data[start..end].to_vec(),
    }
}

/// Profile served for a valid wallet address with no stored document.
pub fn empty_profile() -> PlayerData {
    PlayerData::default()
}
