//! Outcome classification: the pure mapping from analysis to stored outcome.

use fovea_core::types::{AnnotationStatus, ConfidenceLevel, ConfidenceScore};

/// Reason recorded when the annotator's quality gate rejects an image.
pub const REASON_SKIPPED: &str = "Image quality insufficient for processing";
/// Reason recorded when a low score routes the image to a human.
pub const REASON_MANUAL_REVIEW: &str = "Low confidence score requires human review";
/// Reason recorded for successful automated annotation.
pub const REASON_ANNOTATED: &str = "Automated annotation completed successfully";

/// A classified processing outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: AnnotationStatus,
    pub level: ConfidenceLevel,
    pub reason: &'static str,
}

/// Map an analysis to its outcome. Total and side-effect free.
///
/// The skip gate wins over any score, with the level still following the
/// score. Otherwise scores below 0.3 route to manual review and everything
/// at 0.3 or above annotates, medium up to 0.7 and high from there.
pub fn classify(score: ConfidenceScore, force_skip: bool) -> Outcome {
    let level = score.level();
    if force_skip {
        return Outcome {
            status: AnnotationStatus::Skipped,
            level,
            reason: REASON_SKIPPED,
        };
    }
    match level {
        ConfidenceLevel::Low => Outcome {
            status: AnnotationStatus::ManualReview,
            level,
            reason: REASON_MANUAL_REVIEW,
        },
        ConfidenceLevel::Medium | ConfidenceLevel::High => Outcome {
            status: AnnotationStatus::Annotated,
            level,
            reason: REASON_ANNOTATED,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_skip_wins_at_any_score() {
        for raw in [0.0, 0.15, 0.3, 0.55, 0.7, 1.0] {
            let score = ConfidenceScore::new(raw);
            let outcome = classify(score, true);
            assert_eq!(outcome.status, AnnotationStatus::Skipped);
            assert_eq!(outcome.reason, REASON_SKIPPED);
            assert_eq!(outcome.level, score.level());
        }
    }

    #[test]
    fn low_scores_route_to_manual_review() {
        for raw in [0.0, 0.1, 0.299] {
            let outcome = classify(ConfidenceScore::new(raw), false);
            assert_eq!(outcome.status, AnnotationStatus::ManualReview);
            assert_eq!(outcome.level, ConfidenceLevel::Low);
            assert_eq!(outcome.reason, REASON_MANUAL_REVIEW);
        }
    }

    #[test]
    fn medium_scores_annotate() {
        for raw in [0.3, 0.5, 0.699] {
            let outcome = classify(ConfidenceScore::new(raw), false);
            assert_eq!(outcome.status, AnnotationStatus::Annotated);
            assert_eq!(outcome.level, ConfidenceLevel::Medium);
            assert_eq!(outcome.reason, REASON_ANNOTATED);
        }
    }

    #[test]
    fn high_scores_annotate() {
        for raw in [0.7, 0.85, 1.0] {
            let outcome = classify(ConfidenceScore::new(raw), false);
            assert_eq!(outcome.status, AnnotationStatus::Annotated);
            assert_eq!(outcome.level, ConfidenceLevel::High);
            assert_eq!(outcome.reason, REASON_ANNOTATED);
        }
    }

    #[test]
    fn band_boundaries_fall_upward() {
        assert_eq!(
            classify(ConfidenceScore::new(0.3), false).level,
            ConfidenceLevel::Medium
        );
        assert_eq!(
            classify(ConfidenceScore::new(0.7), false).level,
            ConfidenceLevel::High
        );
    }
}
