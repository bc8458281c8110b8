use serde::{Deserialize, Serialize};

/// Checkpointed dataset (blob storage).
///
/// Every persisted dataset shares this shape. `last_queried_block` is the
/// resumption cursor: it is only advanced after all records up to that block
/// for the entity have been appended, and it never decreases across
/// successful runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset<T> {
    pub last_queried_block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    pub data: Vec<T>,
}

impl<T> Dataset<T> {
    pub fn new(last_queried_block: u64) -> Self {
        Self {
            last_queried_block,
            timestamp: None,
            data: Vec::new(),
        }
    }
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape_matches_blob_convention() {
        let ds: Dataset<u64> = Dataset {
            last_queried_block: 42,
            timestamp: None,
            data: vec![1, 2],
        };
        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["lastQueriedBlock"], 42);
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }
}
