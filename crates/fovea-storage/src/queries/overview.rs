//! Dataset-level aggregation: status counts, average confidence, completion.

use fovea_core::errors::StorageError;
use fovea_core::types::{AnnotationStatus, DatasetOverview};
use rusqlite::{params, Connection};

/// Compute the dataset overview.
///
/// One aggregate statement reads every figure from a single snapshot, so the
/// counts, the status breakdown, and the average cannot skew against a
/// concurrent writer. COALESCE keeps the average at 0.0 when nothing has been
/// processed, and the completion rate is 0.0 for an empty dataset. Neither
/// field can be NaN.
pub fn dataset_overview(conn: &Connection) -> Result<DatasetOverview, StorageError> {
    let (total, processed, annotated, skipped, manual_review, average_confidence) = conn
        .query_row(
            "SELECT
                (SELECT COUNT(*) FROM images),
                COUNT(*),
                COALESCE(SUM(CASE WHEN status = ?1 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status = ?2 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status = ?3 THEN 1 ELSE 0 END), 0),
                COALESCE(AVG(confidence_score), 0.0)
             FROM annotation_results",
            params![
                AnnotationStatus::Annotated.as_str(),
                AnnotationStatus::Skipped.as_str(),
                AnnotationStatus::ManualReview.as_str()
            ],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                    row.get::<_, f64>(5)?,
                ))
            },
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let processing_completion_rate = if total > 0 {
        processed as f64 / total as f64
    } else {
        0.0
    };

    Ok(DatasetOverview {
        total_images: total,
        processed_images: processed,
        pending_images: total - processed,
        annotated_images: annotated,
        skipped_images: skipped,
        manual_review_images: manual_review,
        average_confidence,
        processing_completion_rate,
    })
}
