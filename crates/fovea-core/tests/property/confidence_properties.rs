//! Property tests for the confidence score newtype.

use fovea_core::types::{ConfidenceLevel, ConfidenceScore};
use proptest::prelude::*;

fn band_rank(level: ConfidenceLevel) -> u8 {
    match level {
        ConfidenceLevel::Low => 0,
        ConfidenceLevel::Medium => 1,
        ConfidenceLevel::High => 2,
    }
}

proptest! {
    #[test]
    fn construction_clamps_into_the_unit_interval(raw in -10.0f64..10.0) {
        let value = ConfidenceScore::new(raw).value();
        prop_assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn construction_is_idempotent(raw in -10.0f64..10.0) {
        let once = ConfidenceScore::new(raw);
        let twice = ConfidenceScore::new(once.value());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn in_range_scores_pass_through_unchanged(raw in 0.0f64..=1.0) {
        prop_assert_eq!(ConfidenceScore::new(raw).value(), raw);
    }

    #[test]
    fn banding_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_band = band_rank(ConfidenceScore::new(lo).level());
        let hi_band = band_rank(ConfidenceScore::new(hi).level());
        prop_assert!(lo_band <= hi_band);
    }
}
