//! annotation_results table CRUD.

use fovea_core::errors::StorageError;
use fovea_core::types::{
    AnnotationRecord, AnnotationStatus, ConfidenceLevel, ConfidenceScore, NewAnnotation,
};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use crate::connection::writer::with_immediate_transaction;

/// Parse the annotation columns of a row, starting at column `base`.
/// Joined queries pass the offset of the annotation block.
pub(crate) fn annotation_from_row(
    row: &rusqlite::Row<'_>,
    base: usize,
) -> rusqlite::Result<AnnotationRecord> {
    let status_str: String = row.get(base + 2)?;
    let level_str: String = row.get(base + 4)?;
    let annotations_json: Option<String> = row.get(base + 6)?;

    let status = AnnotationStatus::from_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            base + 2,
            Type::Text,
            format!("unknown annotation status: {status_str}").into(),
        )
    })?;
    let confidence_level = ConfidenceLevel::from_str(&level_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            base + 4,
            Type::Text,
            format!("unknown confidence level: {level_str}").into(),
        )
    })?;
    let annotations = annotations_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(base + 6, Type::Text, Box::new(e)))?;

    Ok(AnnotationRecord {
        id: row.get(base)?,
        image_id: row.get(base + 1)?,
        status,
        confidence_score: ConfidenceScore::new(row.get(base + 3)?),
        confidence_level,
        decision_reason: row.get(base + 5)?,
        annotations,
        processing_time_ms: row.get(base + 7)?,
        processed_at: row.get(base + 8)?,
    })
}

/// Insert an annotation result. Returns the row id.
///
/// The UNIQUE constraint on image_id rejects a second result for the same
/// image; that surfaces as `ConstraintViolation`.
pub fn insert_annotation(conn: &Connection, annotation: &NewAnnotation) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO annotation_results
            (image_id, status, confidence_score, confidence_level,
             decision_reason, annotations, processing_time_ms, processed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            annotation.image_id,
            annotation.status.as_str(),
            annotation.confidence_score.value(),
            annotation.confidence_level.as_str(),
            annotation.decision_reason,
            annotation.annotations.as_ref().map(|a| a.to_string()),
            annotation.processing_time_ms,
            annotation.processed_at
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StorageError::ConstraintViolation {
                message: format!("annotation already exists for image {}", annotation.image_id),
            }
        }
        other => StorageError::SqliteError {
            message: other.to_string(),
        },
    })?;
    Ok(conn.last_insert_rowid())
}

/// Replace any previous result for the image with a new one, inside a single
/// BEGIN IMMEDIATE transaction. Reprocessing must never leave an image with
/// two rows or none.
pub fn replace_for_image(conn: &Connection, annotation: &NewAnnotation) -> Result<i64, StorageError> {
    with_immediate_transaction(conn, |tx| {
        delete_for_image(tx, annotation.image_id)?;
        insert_annotation(tx, annotation)
    })
}

/// Delete the annotation result for an image. Returns the rows deleted (0 or 1).
pub fn delete_for_image(conn: &Connection, image_id: i64) -> Result<u64, StorageError> {
    let deleted = conn
        .execute(
            "DELETE FROM annotation_results WHERE image_id = ?1",
            params![image_id],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(deleted as u64)
}

/// Get the annotation result for an image, if any.
pub fn get_for_image(
    conn: &Connection,
    image_id: i64,
) -> Result<Option<AnnotationRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, image_id, status, confidence_score, confidence_level,
                    decision_reason, annotations, processing_time_ms, processed_at
             FROM annotation_results WHERE image_id = ?1",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let mut rows = stmt
        .query_map(params![image_id], |row| annotation_from_row(row, 0))
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

/// List all annotation results, most recently processed first.
pub fn list_annotations(conn: &Connection) -> Result<Vec<AnnotationRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, image_id, status, confidence_score, confidence_level,
                    decision_reason, annotations, processing_time_ms, processed_at
             FROM annotation_results ORDER BY processed_at DESC, id DESC",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let rows = stmt
        .query_map([], |row| annotation_from_row(row, 0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Count total annotation results.
pub fn count_annotations(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM annotation_results", [], |row| {
        row.get(0)
    })
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
