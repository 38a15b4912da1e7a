//! Property tests for the outcome classifier.

use fovea_core::types::{AnnotationStatus, ConfidenceLevel, ConfidenceScore};
use fovea_engine::classifier::{classify, REASON_ANNOTATED, REASON_MANUAL_REVIEW, REASON_SKIPPED};
use proptest::prelude::*;

proptest! {
    #[test]
    fn classification_is_pure(raw in 0.0f64..=1.0, force_skip in any::<bool>()) {
        let first = classify(ConfidenceScore::new(raw), force_skip);
        let second = classify(ConfidenceScore::new(raw), force_skip);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn forced_skips_always_skip(raw in 0.0f64..=1.0) {
        let outcome = classify(ConfidenceScore::new(raw), true);
        prop_assert_eq!(outcome.status, AnnotationStatus::Skipped);
        prop_assert_eq!(outcome.reason, REASON_SKIPPED);
    }

    #[test]
    fn low_scores_go_to_manual_review(raw in 0.0f64..0.3) {
        let outcome = classify(ConfidenceScore::new(raw), false);
        prop_assert_eq!(outcome.status, AnnotationStatus::ManualReview);
        prop_assert_eq!(outcome.level, ConfidenceLevel::Low);
        prop_assert_eq!(outcome.reason, REASON_MANUAL_REVIEW);
    }

    #[test]
    fn passing_scores_annotate(raw in 0.3f64..=1.0) {
        let outcome = classify(ConfidenceScore::new(raw), false);
        prop_assert_eq!(outcome.status, AnnotationStatus::Annotated);
        prop_assert_eq!(outcome.reason, REASON_ANNOTATED);
    }

    #[test]
    fn level_always_tracks_the_score_band(raw in 0.0f64..=1.0, force_skip in any::<bool>()) {
        let score = ConfidenceScore::new(raw);
        prop_assert_eq!(classify(score, force_skip).level, score.level());
    }
}
