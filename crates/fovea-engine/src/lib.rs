//! # fovea-engine
//!
//! The annotation engine: the annotator seam with its simulated
//! implementation, the outcome classifier, and the pipeline that ties both
//! to storage and exposes every dataset operation.

pub mod annotator;
pub mod classifier;
pub mod pipeline;

pub use annotator::{Analysis, Annotator, SimulatedAnnotator};
pub use classifier::{classify, Outcome};
pub use pipeline::AnnotationPipeline;
