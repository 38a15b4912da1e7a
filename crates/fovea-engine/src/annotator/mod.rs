//! The annotator seam: what the engine requires from an image analyzer.

pub mod simulated;

pub use simulated::SimulatedAnnotator;

use fovea_core::errors::AnnotatorError;
use fovea_core::types::{ConfidenceScore, ImageRecord};

/// Raw analysis output for one image, before outcome classification.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// How certain the annotator is about its findings.
    pub score: ConfidenceScore,
    /// Structured findings. The pipeline persists these only when the image
    /// classifies as annotated.
    pub findings: Option<serde_json::Value>,
    /// Quality gate: the annotator refuses the image outright.
    pub force_skip: bool,
}

/// An image analyzer.
///
/// The pipeline treats this as an opaque collaborator: it hands over an
/// image record and gets back a score, findings, and the skip gate. How the
/// score is computed is not the engine's concern.
pub trait Annotator: Send + Sync {
    /// Analyze one image.
    fn analyze(&self, image: &ImageRecord) -> Result<Analysis, AnnotatorError>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}
