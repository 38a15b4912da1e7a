//! Batch processing selector.

use serde::{Deserialize, Serialize};

/// Describes which images a batch operation should target.
///
/// Resolution rule (applied by the pipeline): a non-empty `image_ids` set
/// wins and is processed as given, even for images that already have a
/// result. Otherwise `process_all_pending` selects every image without an
/// annotation record. If neither yields candidates the batch is empty,
/// which is not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSelector {
    pub image_ids: Option<Vec<i64>>,
    pub process_all_pending: Option<bool>,
}

impl BatchSelector {
    /// Target an explicit set of image ids.
    pub fn explicit(ids: Vec<i64>) -> Self {
        Self {
            image_ids: Some(ids),
            process_all_pending: None,
        }
    }

    /// Target every image that has no annotation record yet.
    pub fn all_pending() -> Self {
        Self {
            image_ids: None,
            process_all_pending: Some(true),
        }
    }
}
