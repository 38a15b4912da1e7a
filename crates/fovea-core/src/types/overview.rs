//! Dataset-wide progress rollup.

use serde::{Deserialize, Serialize};

/// Aggregate progress metrics over the full image set.
///
/// Counts are row counts; `pending_images` is always `total_images -
/// processed_images`. Rates are plain fractions in [0, 1], never
/// pre-multiplied by 100, and exactly 0.0 for the empty dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub total_images: i64,
    pub processed_images: i64,
    pub pending_images: i64,
    pub annotated_images: i64,
    pub skipped_images: i64,
    pub manual_review_images: i64,
    pub average_confidence: f64,
    pub processing_completion_rate: f64,
}
