//! Annotation result types: status, confidence banding, stored records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Confidence score clamped to [0.0, 1.0].
/// Expresses how certain the annotator is about its findings.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ConfidenceScore(f64);

impl ConfidenceScore {
    /// Scores below this band as low confidence.
    pub const LOW: f64 = 0.3;
    /// Scores at or above this band as high confidence.
    pub const HIGH: f64 = 0.7;

    /// Create a new score, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Derive the three-way confidence band for this score.
    /// Band boundaries are inclusive on the upper side: 0.3 is medium, 0.7 is high.
    pub fn level(self) -> ConfidenceLevel {
        if self.0 < Self::LOW {
            ConfidenceLevel::Low
        } else if self.0 < Self::HIGH {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::High
        }
    }
}

impl fmt::Display for ConfidenceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for ConfidenceScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<ConfidenceScore> for f64 {
    fn from(score: ConfidenceScore) -> Self {
        score.0
    }
}

/// Three-way confidence banding derived from the score.
/// Never set independently of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// The stored string form of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse the stored string form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal processing state of an image.
/// "Pending" is the absence of an annotation record, never a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationStatus {
    Annotated,
    Skipped,
    ManualReview,
}

impl AnnotationStatus {
    /// The stored string form of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annotated => "annotated",
            Self::Skipped => "skipped",
            Self::ManualReview => "manual_review",
        }
    }

    /// Parse the stored string form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "annotated" => Some(Self::Annotated),
            "skipped" => Some(Self::Skipped),
            "manual_review" => Some(Self::ManualReview),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored annotation result. At most one exists per image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub id: i64,
    pub image_id: i64,
    pub status: AnnotationStatus,
    pub confidence_score: ConfidenceScore,
    pub confidence_level: ConfidenceLevel,
    pub decision_reason: String,
    /// Structured findings. Non-null exactly when `status` is `Annotated`.
    pub annotations: Option<serde_json::Value>,
    pub processing_time_ms: i64,
    /// Unix epoch milliseconds.
    pub processed_at: i64,
}

/// An annotation result ready to be persisted (no row id yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnnotation {
    pub image_id: i64,
    pub status: AnnotationStatus,
    pub confidence_score: ConfidenceScore,
    pub confidence_level: ConfidenceLevel,
    pub decision_reason: String,
    pub annotations: Option<serde_json::Value>,
    pub processing_time_ms: i64,
    pub processed_at: i64,
}
