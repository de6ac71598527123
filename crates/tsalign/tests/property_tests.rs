//! Property-based tests for the DTW aligner.
//!
//! Generated inputs are finite and non-constant, matching the aligner's
//! contract; each property asserts a structural invariant that must hold
//! for every valid input pair.

use proptest::prelude::*;

use tsalign::{DtwAligner, WarpingStep};

/// Finite, non-constant sequences of modest length.
fn sequence() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1000.0..1000.0f64, 2..40)
        .prop_filter("constant sequences cannot be normalized", |v| {
            v.iter().any(|x| *x != v[0])
        })
}

proptest! {
    #[test]
    fn path_endpoints_are_fixed(a in sequence(), b in sequence()) {
        let result = DtwAligner::new().align(&a, &b).unwrap();
        let steps = result.path.steps();
        prop_assert_eq!(steps.first().unwrap(), &WarpingStep { a: 0, b: 0 });
        prop_assert_eq!(
            steps.last().unwrap(),
            &WarpingStep { a: a.len() - 1, b: b.len() - 1 }
        );
    }

    #[test]
    fn steps_are_monotone(a in sequence(), b in sequence()) {
        let result = DtwAligner::new().align(&a, &b).unwrap();
        for pair in result.path.steps().windows(2) {
            // Signed deltas so a backwards step fails the assertion instead
            // of overflowing the subtraction.
            let da = pair[1].a as i64 - pair[0].a as i64;
            let db = pair[1].b as i64 - pair[0].b as i64;
            prop_assert!(matches!((da, db), (1, 0) | (0, 1) | (1, 1)));
        }
    }

    #[test]
    fn alignment_is_deterministic(a in sequence(), b in sequence()) {
        let first = DtwAligner::new().align(&a, &b).unwrap();
        let second = DtwAligner::new().align(&a, &b).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distance_is_finite_and_non_negative(a in sequence(), b in sequence()) {
        let result = DtwAligner::new().align(&a, &b).unwrap();
        prop_assert!(result.total_distance.is_finite());
        prop_assert!(result.total_distance >= 0.0);
        prop_assert_eq!(result.cumulative_costs.len(), result.path.len());
        prop_assert!(result.cumulative_costs.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn self_alignment_has_zero_distance(a in sequence()) {
        let result = DtwAligner::new().align(&a, &a).unwrap();
        prop_assert_eq!(result.total_distance, 0.0);
    }

    #[test]
    fn positive_affine_transform_preserves_distance(
        a in sequence(),
        b in sequence(),
        scale in 0.5..10.0f64,
        offset in -50.0..50.0f64,
    ) {
        let rescaled: Vec<f64> = a.iter().map(|v| v * scale + offset).collect();
        let plain = DtwAligner::new().align(&a, &b).unwrap();
        let affine = DtwAligner::new().align(&rescaled, &b).unwrap();
        // Min-max normalization absorbs the transform up to rounding.
        prop_assert!((plain.total_distance - affine.total_distance).abs() < 1e-9);
    }
}
