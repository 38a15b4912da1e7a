//! Annotator errors.

/// Errors raised by an annotator implementation.
#[derive(Debug, thiserror::Error)]
pub enum AnnotatorError {
    #[error("Analysis of image {image_id} failed: {reason}")]
    AnalysisFailed { image_id: i64, reason: String },

    #[error("Annotator '{name}' is unavailable")]
    Unavailable { name: String },
}
