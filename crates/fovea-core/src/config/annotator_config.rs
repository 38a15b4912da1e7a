//! Simulated annotator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the simulated annotator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Probability that an image is skipped for quality reasons,
    /// in [0.0, 1.0]. Default: 0.1.
    pub skip_probability: Option<f64>,
    /// Fixed RNG seed for reproducible runs. Unset seeds from entropy.
    pub seed: Option<u64>,
}

impl AnnotatorConfig {
    /// Returns the effective skip probability, defaulting to 0.1.
    pub fn effective_skip_probability(&self) -> f64 {
        self.skip_probability.unwrap_or(0.1)
    }
}
