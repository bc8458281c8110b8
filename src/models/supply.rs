use serde::{Deserialize, Serialize};

/// Token supply snapshot, appended once per run.
///
/// `reserve` is the reserve asset held by the yield source; `tickets` is the
/// outstanding receipt-token supply. The dataset is a time series by
/// construction (appended, never upserted).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supply {
    pub block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub reserve: f64,
    pub tickets: f64,
}
