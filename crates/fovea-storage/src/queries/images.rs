//! images table CRUD and pending-set queries.

use std::time::{SystemTime, UNIX_EPOCH};

use fovea_core::errors::StorageError;
use fovea_core::types::{ImageRecord, ImageWithAnnotation, NewImage};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use super::annotations::annotation_from_row;

fn row_to_image(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImageRecord> {
    let metadata_json: Option<String> = row.get(6)?;
    let metadata = metadata_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(ImageRecord {
        id: row.get(0)?,
        filename: row.get(1)?,
        storage_path: row.get(2)?,
        file_size: row.get(3)?,
        width: row.get(4)?,
        height: row.get(5)?,
        metadata,
        upload_date: row.get(7)?,
    })
}

fn row_to_image_with_annotation(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImageWithAnnotation> {
    let image = row_to_image(row)?;
    let annotation_id: Option<i64> = row.get(8)?;
    let annotation_result = match annotation_id {
        Some(_) => Some(annotation_from_row(row, 8)?),
        None => None,
    };
    Ok(ImageWithAnnotation {
        image,
        annotation_result,
    })
}

/// Insert a new image record with the current time as upload date.
/// Returns the row id.
pub fn insert_image(conn: &Connection, image: &NewImage) -> Result<i64, StorageError> {
    let upload_date = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64;

    conn.execute(
        "INSERT INTO images
            (filename, storage_path, file_size, width, height, metadata, upload_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            image.filename,
            image.storage_path,
            image.file_size,
            image.width,
            image.height,
            image.metadata.as_ref().map(|m| m.to_string()),
            upload_date
        ],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(conn.last_insert_rowid())
}

/// Get an image by id.
pub fn get_image(conn: &Connection, id: i64) -> Result<Option<ImageRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, filename, storage_path, file_size, width, height, metadata, upload_date
             FROM images WHERE id = ?1",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let mut rows = stmt
        .query_map(params![id], row_to_image)
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    match rows.next() {
        Some(Ok(record)) => Ok(Some(record)),
        Some(Err(e)) => Err(StorageError::SqliteError {
            message: e.to_string(),
        }),
        None => Ok(None),
    }
}

/// List all images, most recent upload first.
pub fn list_images(conn: &Connection) -> Result<Vec<ImageRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, filename, storage_path, file_size, width, height, metadata, upload_date
             FROM images ORDER BY upload_date DESC, id DESC",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let rows = stmt
        .query_map([], row_to_image)
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Delete an image. Any annotation result cascades away with it.
/// Returns whether a row was actually deleted.
pub fn delete_image(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let deleted = conn
        .execute("DELETE FROM images WHERE id = ?1", params![id])
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(deleted > 0)
}

/// Count total images in the database.
pub fn count_images(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Ids of images with no annotation result yet, in ascending id order.
pub fn pending_image_ids(conn: &Connection) -> Result<Vec<i64>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT i.id FROM images i
             LEFT JOIN annotation_results a ON a.image_id = i.id
             WHERE a.id IS NULL
             ORDER BY i.id",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Get an image together with its annotation result, if any.
pub fn get_image_with_annotation(
    conn: &Connection,
    id: i64,
) -> Result<Option<ImageWithAnnotation>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT i.id, i.filename, i.storage_path, i.file_size, i.width, i.height,
                    i.metadata, i.upload_date,
                    a.id, a.image_id, a.status, a.confidence_score, a.confidence_level,
                    a.decision_reason, a.annotations, a.processing_time_ms, a.processed_at
             FROM images i
             LEFT JOIN annotation_results a ON a.image_id = i.id
             WHERE i.id = ?1",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let mut rows = stmt
        .query_map(params![id], row_to_image_with_annotation)
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    match rows.next() {
        Some(Ok(record)) => Ok(Some(record)),
        Some(Err(e)) => Err(StorageError::SqliteError {
            message: e.to_string(),
        }),
        None => Ok(None),
    }
}

/// List all images joined with their annotation results, most recent
/// upload first. Unprocessed images carry no annotation.
pub fn list_images_with_annotations(
    conn: &Connection,
) -> Result<Vec<ImageWithAnnotation>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT i.id, i.filename, i.storage_path, i.file_size, i.width, i.height,
                    i.metadata, i.upload_date,
                    a.id, a.image_id, a.status, a.confidence_score, a.confidence_level,
                    a.decision_reason, a.annotations, a.processing_time_ms, a.processed_at
             FROM images i
             LEFT JOIN annotation_results a ON a.image_id = i.id
             ORDER BY i.upload_date DESC, i.id DESC",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let rows = stmt
        .query_map([], row_to_image_with_annotation)
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?);
    }
    Ok(result)
}
