//! Error handling for Fovea.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod annotator_error;
pub mod config_error;
pub mod pipeline_error;
pub mod storage_error;

pub use annotator_error::AnnotatorError;
pub use config_error::ConfigError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use storage_error::StorageError;
