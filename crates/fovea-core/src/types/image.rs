//! Image record types.

use serde::{Deserialize, Serialize};

use super::annotation::AnnotationRecord;

/// A stored image. Descriptive attributes are immutable after ingestion;
/// the engine never mutates an image, only its annotation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub filename: String,
    pub storage_path: String,
    pub file_size: i64,
    pub width: i64,
    pub height: i64,
    /// Free-form metadata attached at ingestion, opaque to the engine.
    pub metadata: Option<serde_json::Value>,
    /// Unix epoch milliseconds.
    pub upload_date: i64,
}

/// An image ready to be ingested (no row id or upload date yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewImage {
    pub filename: String,
    pub storage_path: String,
    pub file_size: i64,
    pub width: i64,
    pub height: i64,
    pub metadata: Option<serde_json::Value>,
}

/// An image joined with its annotation record, if one exists.
/// `annotation_result` is `None` exactly for pending images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageWithAnnotation {
    #[serde(flatten)]
    pub image: ImageRecord,
    pub annotation_result: Option<AnnotationRecord>,
}
