//! Simulated annotator: random scores and synthetic findings.

use std::sync::Mutex;

use fovea_core::config::AnnotatorConfig;
use fovea_core::errors::AnnotatorError;
use fovea_core::types::{ConfidenceScore, ImageRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use super::{Analysis, Annotator};

/// Stand-in for a real image analysis model.
///
/// Draws a uniform confidence score, a skip decision, and a synthetic
/// bounding box per image. Seedable for reproducible runs.
pub struct SimulatedAnnotator {
    rng: Mutex<StdRng>,
    skip_probability: f64,
}

impl SimulatedAnnotator {
    /// Build from configuration. A configured seed makes runs reproducible;
    /// without one the generator seeds from OS entropy.
    pub fn from_config(config: &AnnotatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            skip_probability: config.effective_skip_probability().clamp(0.0, 1.0),
        }
    }

    /// Fixed-seed constructor with the default skip probability.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(&AnnotatorConfig {
            skip_probability: None,
            seed: Some(seed),
        })
    }
}

impl Default for SimulatedAnnotator {
    fn default() -> Self {
        Self::from_config(&AnnotatorConfig::default())
    }
}

impl Annotator for SimulatedAnnotator {
    fn analyze(&self, image: &ImageRecord) -> Result<Analysis, AnnotatorError> {
        let mut rng = self.rng.lock().map_err(|_| AnnotatorError::Unavailable {
            name: "simulated".to_string(),
        })?;

        let raw = rng.gen_range(0.0..1.0);
        let force_skip = rng.gen_bool(self.skip_probability);
        let findings = json!({
            "objects": [{
                "type": "object",
                "confidence": raw,
                "bbox": [
                    rng.gen_range(0.0..100.0),
                    rng.gen_range(0.0..100.0),
                    rng.gen_range(100.0..300.0),
                    rng.gen_range(100.0..300.0),
                ],
            }]
        });

        tracing::trace!(image_id = image.id, score = raw, force_skip, "image analyzed");

        Ok(Analysis {
            score: ConfidenceScore::new(raw),
            findings: Some(findings),
            force_skip,
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
