//! Dataset reset: clears annotation results while keeping images.

use fovea_core::errors::StorageError;
use rusqlite::Connection;

/// Delete every annotation result, returning every image to pending.
/// Images themselves are untouched. Returns the number of rows deleted,
/// which is 0 when the dataset is already clean.
pub fn reset_annotations(conn: &Connection) -> Result<u64, StorageError> {
    let deleted = conn
        .execute("DELETE FROM annotation_results", [])
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })? as u64;
    Ok(deleted)
}
