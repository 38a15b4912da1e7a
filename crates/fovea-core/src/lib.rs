//! # fovea-core
//!
//! Foundation crate for the Fovea annotation pipeline.
//! Defines domain types, error enums, configuration, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::FoveaConfig;
pub use errors::{PipelineError, PipelineResult};
pub use types::{
    AnnotationRecord, AnnotationStatus, ConfidenceLevel, ConfidenceScore, DatasetOverview,
    ImageRecord,
};
