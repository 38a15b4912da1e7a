//! Aggregate pipeline error, the surface callers of the engine see.

use super::annotator_error::AnnotatorError;
use super::storage_error::StorageError;

/// Result alias used throughout the pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced by pipeline operations.
///
/// Collaborator failures propagate unmodified; the pipeline performs no
/// retries and no silent recovery.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Image {id} not found")]
    ImageNotFound { id: i64 },

    #[error("Image {image_id} already has an annotation result")]
    DuplicateAnnotation { image_id: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Annotator error: {0}")]
    Annotator(#[from] AnnotatorError),
}
