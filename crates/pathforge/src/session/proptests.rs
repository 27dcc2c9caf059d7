//! Property tests for session bookkeeping.

use proptest::prelude::*;

use super::*;
use crate::error::SessionErrorKind;

fn valid_range() -> impl Strategy<Value = (f64, f64)> {
    (-1.0e6..1.0e6f64, 0.0..1.0e6f64).prop_map(|(min, extent)| (min, min + extent))
}

proptest! {
    #[test]
    fn dimension_count_matches_valid_adds(ranges in prop::collection::vec(valid_range(), 0..32)) {
        let mut session = Session::default();
        for &(min, max) in &ranges {
            prop_assert!(session.add_dimension(min, max).is_ok());
        }
        prop_assert_eq!(session.dimension_count(), ranges.len());

        prop_assert!(session.reset().is_ok());
        prop_assert_eq!(session.dimension_count(), 0);
    }

    #[test]
    fn inverted_ranges_leave_space_unchanged(
        min in -1.0e6..1.0e6f64,
        gap in 1.0e-6..1.0e6f64,
        existing in 0usize..4,
    ) {
        let mut session = Session::default();
        for _ in 0..existing {
            session.add_dimension(0.0, 1.0).unwrap();
        }

        let err = session.add_dimension(min + gap, min).unwrap_err();
        prop_assert_eq!(err.kind(), SessionErrorKind::InvalidRange);
        prop_assert_eq!(session.dimension_count(), existing);
    }

    #[test]
    fn resolution_is_always_clamped(resolution in -10.0..10.0f64) {
        let mut session = Session::default();
        let stored = session.set_validity_checking_resolution(resolution).unwrap();

        prop_assert!((0.0..=1.0).contains(&stored));
        prop_assert_eq!(stored, session.validity_checking_resolution());
    }

    #[test]
    fn copy_solution_rejects_other_shapes(
        wrong_steps in 0usize..8,
        wrong_dimensions in 0usize..5,
    ) {
        let mut session = Session::new(PlannerConfig::default().with_interpolation(false));
        session.add_dimension(0.0, 1.0).unwrap();
        session.add_dimension(0.0, 1.0).unwrap();
        let steps = session.solve(&[0.0, 0.0], &[1.0, 1.0], 1.0).unwrap();
        prop_assume!(wrong_steps != steps || wrong_dimensions != 2);

        let mut out = vec![f64::NAN; wrong_steps * wrong_dimensions];
        prop_assert!(session.copy_solution(wrong_steps, wrong_dimensions, &mut out).is_err());
        prop_assert!(out.iter().all(|v| v.is_nan()));
    }
}
