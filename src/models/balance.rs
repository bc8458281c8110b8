use serde::{Deserialize, Serialize};

/// Current receipt-token balance of one wallet.
///
/// Balance datasets are upserted by wallet rather than appended, and the
/// full set is kept sorted non-increasing by balance at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub wallet: String,
    pub balance: f64,
}
