//! Domain types for the annotation pipeline.
//! Image records, annotation results, the dataset rollup, batch selectors.

pub mod annotation;
pub mod batch;
pub mod image;
pub mod overview;

pub use annotation::{
    AnnotationRecord, AnnotationStatus, ConfidenceLevel, ConfidenceScore, NewAnnotation,
};
pub use batch::BatchSelector;
pub use image::{ImageRecord, ImageWithAnnotation, NewImage};
pub use overview::DatasetOverview;
