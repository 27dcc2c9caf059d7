//! Tests for the planning session.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use pathforge_config::{DefaultValidity, EngineType, PlannerConfig};
use pathforge_core::RejectAll;
use pathforge_planner::{DirectEngine, PathShortcutter, MIN_RESOLUTION};
use pathforge_test::oracles::{BoxObstacle, PanickingOracle, WallWithGap};
use pathforge_test::spaces::mixed_ranges;
use pathforge_test::{assert_path_valid, assert_segments_at_most, assert_states_close};

use super::*;
use crate::error::SessionErrorKind;
use crate::EngineFactory;

const SENTINEL: f64 = -12345.0;

fn plane_session(size: f64) -> Session {
    let mut session = Session::default();
    session.add_dimension(0.0, size).unwrap();
    session.add_dimension(0.0, size).unwrap();
    session
}

fn seeded_config() -> PlannerConfig {
    PlannerConfig::default().with_random_seed(42)
}

#[test]
fn test_new_session_is_empty() {
    let session = Session::default();

    assert_eq!(session.dimension_count(), 0);
    assert!(!session.has_validity_checker());
    assert_eq!(session.outcome(), SolveOutcome::UNSOLVED);
    assert!(session.solution().is_none());
    assert_eq!(session.generation(), 0);
    assert_eq!(session.engine_type_name(), "BidirectionalTree");
}

#[test]
fn test_dimension_count_follows_adds_and_reset() {
    let mut session = Session::default();
    for i in 0..5 {
        session.add_dimension(-1.0, i as f64).unwrap();
        assert_eq!(session.dimension_count(), i + 1);
    }

    session.reset().unwrap();
    assert_eq!(session.dimension_count(), 0);
    assert_eq!(session.generation(), 1);
}

#[test]
fn test_invalid_ranges_are_rejected() {
    let mut session = Session::default();
    session.add_dimension(0.0, 1.0).unwrap();

    for (min, max) in [(2.0, 1.0), (f64::NAN, 1.0), (0.0, f64::INFINITY)] {
        let err = session.add_dimension(min, max).unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::InvalidRange);
    }
    assert_eq!(session.dimension_count(), 1);

    // A degenerate range is still a range.
    session.add_dimension(3.0, 3.0).unwrap();
    assert_eq!(session.dimension_count(), 2);
}

#[test]
fn test_reset_refused_while_leased() {
    let mut session = plane_session(10.0);
    session.set_validity_checker(Arc::new(RejectAll));
    let lease = session.lease_space();

    let err = session.reset().unwrap_err();
    assert_eq!(err, SessionError::ConcurrentOwnership { leases: 1 });
    assert_eq!(session.dimension_count(), 2);
    assert!(session.has_validity_checker());
    assert_eq!(session.generation(), 0);

    drop(lease);
    session.reset().unwrap();
    assert_eq!(session.dimension_count(), 0);
    assert!(!session.has_validity_checker());
}

#[test]
fn test_reset_clears_solution() {
    let mut session = plane_session(10.0);
    session.solve(&[1.0, 1.0], &[9.0, 9.0], 1.0).unwrap();
    assert!(session.outcome().solved);

    session.reset().unwrap();
    assert_eq!(session.outcome(), SolveOutcome::UNSOLVED);
    assert_eq!(
        session.copy_solution(2, 2, &mut [0.0; 4]).unwrap_err(),
        SessionError::NotSolved
    );
}

#[test]
fn test_lease_keeps_its_snapshot() {
    let mut session = plane_session(10.0);
    let lease = session.lease_space();

    session.add_dimension(0.0, 1.0).unwrap();

    assert_eq!(lease.dimension_count(), 2);
    assert_eq!(session.lease_space().space().dimension_count(), 3);
    assert_eq!(session.activity().outstanding_leases(), 1);
}

#[test]
fn test_has_validity_checker_tracks_set_and_clear() {
    let mut session = Session::default();
    assert!(!session.has_validity_checker());

    session.set_validity_checker(Arc::new(|_: &[f64]| true));
    assert!(session.has_validity_checker());

    session.clear_validity_checker();
    assert!(!session.has_validity_checker());

    session.set_validity_checker(Arc::new(RejectAll));
    session.reset().unwrap();
    assert!(!session.has_validity_checker());
}

#[test]
fn test_round_trip_open_plane() {
    let mut session = plane_session(10.0);

    let steps = session.solve(&[0.0, 0.0], &[10.0, 10.0], 1.0).unwrap();
    assert!(steps >= 2);
    assert_eq!(
        session.outcome(),
        SolveOutcome {
            solved: true,
            step_count: steps as i32
        }
    );
    assert_eq!(session.solution_shape(), Some((steps, 2)));

    let mut out = vec![SENTINEL; steps * 2];
    session.copy_solution(steps, 2, &mut out).unwrap();
    assert_states_close(&out[..2], &[0.0, 0.0], 1e-9);
    assert_states_close(&out[out.len() - 2..], &[10.0, 10.0], 1e-9);
    assert!(out.iter().all(|&v| v != SENTINEL));
}

#[test]
fn test_interpolation_spacing_follows_resolution() {
    let mut session = plane_session(10.0);
    session.set_validity_checking_resolution(0.05).unwrap();

    session.solve(&[0.0, 0.0], &[10.0, 0.0], 1.0).unwrap();

    let path = session.solution().unwrap();
    let longest = 0.05 * session.space().maximum_extent();
    assert_segments_at_most(path, session.space(), longest);
    assert!(path.len() > 2);
}

#[test]
fn test_interpolation_can_be_disabled() {
    let mut session = Session::new(PlannerConfig::default().with_interpolation(false));
    session.add_dimension(0.0, 10.0).unwrap();
    session.add_dimension(0.0, 10.0).unwrap();

    let steps = session.solve(&[0.0, 0.0], &[10.0, 10.0], 1.0).unwrap();
    assert_eq!(steps, 2);
}

#[test]
fn test_reject_all_oracle_fails_solve() {
    let mut session = plane_session(10.0);
    session.set_validity_checker(Arc::new(RejectAll));

    let err = session.solve(&[1.0, 1.0], &[9.0, 9.0], 0.5).unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Engine);
    assert_eq!(session.outcome().step_count, -1);
    assert!(!session.outcome().solved);
}

#[test]
fn test_reject_default_without_oracle_fails_solve() {
    let config = PlannerConfig::default().with_default_validity(DefaultValidity::Reject);
    let mut session = Session::new(config);
    session.add_dimension(0.0, 1.0).unwrap();

    let err = session.solve(&[0.0], &[1.0], 0.5).unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Engine);

    session.set_validity_checker(Arc::new(|_: &[f64]| true));
    assert!(session.solve(&[0.0], &[1.0], 0.5).is_ok());
}

#[test]
fn test_solve_validates_query() {
    let mut session = Session::default();
    let err = session.solve(&[], &[], 1.0).unwrap_err();
    assert_eq!(err, SessionError::EmptySpace);

    session.add_dimension(0.0, 1.0).unwrap();
    let err = session.solve(&[0.0, 0.0], &[1.0], 1.0).unwrap_err();
    assert_eq!(
        err,
        SessionError::DimensionMismatch {
            expected: 1,
            actual: 2
        }
    );

    for budget in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = session.solve(&[0.0], &[1.0], budget).unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::InvalidTimeBudget);
    }
    assert_eq!(session.outcome(), SolveOutcome::UNSOLVED);
}

#[test]
fn test_huge_time_budget_saturates() {
    let mut session = plane_session(10.0);

    let steps = session.solve(&[0.0, 0.0], &[10.0, 10.0], 1.0e20).unwrap();
    assert_eq!(session.outcome(), SolveOutcome::solved(steps));

    assert!(session.solve(&[0.0, 0.0], &[10.0, 10.0], f64::MAX).is_ok());
}

#[test]
fn test_out_of_bounds_start_is_an_engine_error() {
    let mut session = plane_session(10.0);

    let err = session.solve(&[-1.0, 0.0], &[5.0, 5.0], 0.5).unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Engine);
}

#[test]
fn test_failed_solve_drops_previous_solution() {
    let mut session = plane_session(10.0);
    session.solve(&[1.0, 1.0], &[9.0, 9.0], 1.0).unwrap();
    assert!(session.solution().is_some());

    session.set_validity_checker(Arc::new(BoxObstacle::new(
        vec![4.0, 0.0],
        vec![6.0, 10.0],
    )));
    let err = session.solve(&[1.0, 5.0], &[9.0, 5.0], 0.2).unwrap_err();

    assert_eq!(err, SessionError::NotSolved);
    assert!(session.solution().is_none());
    assert_eq!(session.outcome().step_count, -1);
}

#[test]
fn test_add_dimension_invalidates_solution() {
    let mut session = plane_session(10.0);
    let steps = session.solve(&[1.0, 1.0], &[9.0, 9.0], 1.0).unwrap();

    session.add_dimension(0.0, 1.0).unwrap();

    let mut out = vec![SENTINEL; steps * 3];
    let err = session.copy_solution(steps, 3, &mut out).unwrap_err();
    assert_eq!(err, SessionError::NotSolved);
    assert!(out.iter().all(|&v| v == SENTINEL));
}

#[test]
fn test_copy_solution_requires_matching_shape() {
    let mut session = plane_session(10.0);
    let mut out = vec![SENTINEL; 8];
    assert_eq!(
        session.copy_solution(4, 2, &mut out).unwrap_err(),
        SessionError::NotSolved
    );

    let steps = session.solve(&[1.0, 1.0], &[9.0, 9.0], 1.0).unwrap();
    let mut out = vec![SENTINEL; (steps + 1) * 3];

    for (s, d, len) in [
        (steps + 1, 2, (steps + 1) * 2),
        (steps, 3, steps * 3),
        (steps, 2, steps * 2 - 1),
    ] {
        let err = session.copy_solution(s, d, &mut out[..len]).unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::PreconditionMismatch);
    }
    assert!(out.iter().all(|&v| v == SENTINEL));

    session.copy_solution(steps, 2, &mut out[..steps * 2]).unwrap();
    assert_eq!(out[steps * 2], SENTINEL);
}

#[test]
fn test_resolution_clamps_and_persists() {
    let mut session = plane_session(10.0);
    assert_eq!(session.validity_checking_resolution(), 0.01);

    assert_eq!(session.set_validity_checking_resolution(2.0), Ok(1.0));
    assert_eq!(session.set_validity_checking_resolution(-0.5), Ok(0.0));
    assert_eq!(session.set_validity_checking_resolution(0.2), Ok(0.2));
    let err = session.set_validity_checking_resolution(f64::NAN).unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::InvalidResolution);

    session.solve(&[1.0, 1.0], &[9.0, 9.0], 1.0).unwrap();
    assert_eq!(session.validity_checking_resolution(), 0.2);

    session.reset().unwrap();
    assert_eq!(session.validity_checking_resolution(), 0.01);
}

#[test]
fn test_zero_resolution_uses_floor() {
    let mut session = Session::default();
    session.add_dimension(0.0, 1.0).unwrap();
    session.set_validity_checking_resolution(0.0).unwrap();

    let steps = session.solve(&[0.0], &[0.01], 1.0).unwrap();

    let longest = MIN_RESOLUTION * session.space().maximum_extent();
    assert_segments_at_most(session.solution().unwrap(), session.space(), longest);
    assert!(steps >= 100);
}

#[test]
fn test_solves_through_gap() {
    let mut session = Session::new(seeded_config());
    session.add_dimension(0.0, 10.0).unwrap();
    session.add_dimension(0.0, 10.0).unwrap();
    session.set_validity_checker(Arc::new(WallWithGap::standard()));

    session.solve(&[1.0, 1.0], &[9.0, 1.0], 5.0).unwrap();

    let path = session.solution().unwrap();
    assert_path_valid(path, session.space(), &WallWithGap::standard());
    assert!(session.statistics().validity_checks > 0);
    assert!(session.statistics().tree_states >= 2);
    assert_eq!(session.statistics().path_states, path.len());
}

#[test]
fn test_seeded_sessions_agree() {
    let solve = || {
        let mut session = Session::new(seeded_config());
        session.add_dimension(0.0, 10.0).unwrap();
        session.add_dimension(0.0, 10.0).unwrap();
        session.set_validity_checker(Arc::new(WallWithGap::standard()));
        session.solve(&[1.0, 1.0], &[9.0, 1.0], 5.0).unwrap();
        session.solution().cloned()
    };

    assert_eq!(solve(), solve());
}

#[test]
fn test_mixed_range_space() {
    let mut session = Session::default();
    for d in mixed_ranges().dimensions() {
        session.add_dimension(d.min(), d.max()).unwrap();
    }

    let start = [-1.0, -59.0, 0.0];
    let goal = [1.0, -33.0, 500.0];
    let steps = session.solve(&start, &goal, 1.0).unwrap();

    let mut out = vec![0.0; steps * 3];
    session.copy_solution(steps, 3, &mut out).unwrap();
    assert_states_close(&out[..3], &start, 1e-9);
    assert_states_close(&out[(steps - 1) * 3..], &goal, 1e-9);
}

#[test]
fn test_cancel_flag_stops_solve() {
    let mut session = Session::new(seeded_config());
    session.add_dimension(0.0, 10.0).unwrap();
    session.add_dimension(0.0, 10.0).unwrap();
    session.set_validity_checker(Arc::new(BoxObstacle::new(
        vec![4.0, 0.0],
        vec![6.0, 10.0],
    )));
    let cancel = AtomicBool::new(true);

    let err = session
        .solve_with_cancel(&[1.0, 5.0], &[9.0, 5.0], 60.0, &cancel)
        .unwrap_err();

    assert_eq!(err, SessionError::NotSolved);
}

#[test]
fn test_custom_engine_factory() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let factory = EngineFactory::custom(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::new(DirectEngine::new())
    });
    let mut session = Session::with_engine_factory(PlannerConfig::default(), factory);
    assert_eq!(built.load(Ordering::SeqCst), 1);

    session.add_dimension(0.0, 10.0).unwrap();
    session.add_dimension(0.0, 10.0).unwrap();
    session.set_validity_checker(Arc::new(WallWithGap::standard()));
    let err = session.solve(&[1.0, 1.0], &[9.0, 1.0], 5.0).unwrap_err();
    assert_eq!(err, SessionError::NotSolved);

    session.reset().unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 2);
}

#[test]
fn test_configured_direct_engine() {
    let session = Session::new(PlannerConfig::default().with_engine(EngineType::Direct));
    assert_eq!(session.engine_type_name(), "Direct");
}

#[test]
fn test_engine_panic_is_contained() {
    let mut session = plane_session(10.0);
    session.set_validity_checker(Arc::new(PanickingOracle));

    let err = session.solve(&[1.0, 1.0], &[9.0, 9.0], 1.0).unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Engine);
    assert!(!session.activity().is_solving());
    assert_eq!(session.activity().outstanding_leases(), 0);

    session.clear_validity_checker();
    assert!(session.solve(&[1.0, 1.0], &[9.0, 9.0], 1.0).is_ok());
}

#[test]
fn test_activity_visible_during_solve() {
    let mut session = plane_session(10.0);
    let activity = session.activity();
    let seen_solving = Arc::new(AtomicBool::new(false));
    let seen_leases = Arc::new(AtomicUsize::new(0));

    let (solving, leases) = (Arc::clone(&seen_solving), Arc::clone(&seen_leases));
    session.set_validity_checker(Arc::new(move |_: &[f64]| {
        solving.store(activity.is_solving(), Ordering::SeqCst);
        leases.store(activity.outstanding_leases(), Ordering::SeqCst);
        true
    }));

    session.solve(&[1.0, 1.0], &[9.0, 9.0], 1.0).unwrap();

    assert!(seen_solving.load(Ordering::SeqCst));
    assert_eq!(seen_leases.load(Ordering::SeqCst), 1);
    assert!(!session.activity().is_solving());
    assert!(session.reset().is_ok());
}

/// Returns a fixed zig-zag across the plane, optionally after a delay.
#[derive(Debug)]
struct ZigZagEngine {
    delay: Duration,
    shortcutter: PathShortcutter,
}

impl ZigZagEngine {
    fn factory(delay: Duration) -> EngineFactory {
        EngineFactory::custom(move || {
            Box::new(ZigZagEngine {
                delay,
                shortcutter: PathShortcutter::new(50),
            })
        })
    }
}

impl PlanningEngine for ZigZagEngine {
    fn engine_type_name(&self) -> &'static str {
        "ZigZag"
    }

    fn plan(
        &mut self,
        _scope: &mut PlanScope<'_>,
        start: &State,
        goal: &State,
        _termination: &dyn Termination,
    ) -> std::result::Result<Option<Path>, PlannerError> {
        thread::sleep(self.delay);
        Ok(Some(Path::from_states(vec![
            start.clone(),
            State::new(vec![3.0, 9.0]),
            State::new(vec![5.0, 1.0]),
            State::new(vec![7.0, 9.0]),
            goal.clone(),
        ])))
    }

    fn simplify(
        &mut self,
        scope: &mut PlanScope<'_>,
        path: &mut Path,
        termination: &dyn Termination,
    ) -> std::result::Result<(), PlannerError> {
        self.shortcutter.simplify(scope, path, termination);
        Ok(())
    }
}

fn zig_zag_session(config: PlannerConfig, delay: Duration) -> Session {
    let mut session = Session::with_engine_factory(
        config.with_random_seed(7).with_interpolation(false),
        ZigZagEngine::factory(delay),
    );
    session.add_dimension(0.0, 10.0).unwrap();
    session.add_dimension(0.0, 10.0).unwrap();
    session
}

#[test]
fn test_simplification_straightens_detour() {
    let mut session = zig_zag_session(PlannerConfig::default(), Duration::ZERO);

    let steps = session.solve(&[1.0, 1.0], &[9.0, 1.0], 5.0).unwrap();

    assert_eq!(steps, 2);
    let path = session.solution().unwrap();
    assert_states_close(path.first().unwrap(), &[1.0, 1.0], 1e-12);
    assert_states_close(path.last().unwrap(), &[9.0, 1.0], 1e-12);
    assert_eq!(session.statistics().path_states, 2);
}

#[test]
fn test_simplification_disabled_keeps_raw_path() {
    let mut session = zig_zag_session(
        PlannerConfig::default().with_simplification(false),
        Duration::ZERO,
    );

    let steps = session.solve(&[1.0, 1.0], &[9.0, 1.0], 5.0).unwrap();

    assert_eq!(steps, 5);
    assert_eq!(session.statistics().simplification_duration, Duration::ZERO);
}

#[test]
fn test_simplification_skipped_after_deadline() {
    let mut session = zig_zag_session(PlannerConfig::default(), Duration::from_millis(60));

    // The engine returns after the whole budget is spent.
    let steps = session.solve(&[1.0, 1.0], &[9.0, 1.0], 0.02).unwrap();

    assert_eq!(steps, 5);
    assert_eq!(session.statistics().simplification_duration, Duration::ZERO);
    assert!(session.statistics().planning_duration >= Duration::from_millis(20));
}

#[test]
fn test_preset_cancel_skips_direct_connection() {
    let mut session = Session::with_engine_factory(
        PlannerConfig::default(),
        EngineFactory::custom(|| Box::new(DirectEngine::new())),
    );
    session.add_dimension(0.0, 10.0).unwrap();
    session.add_dimension(0.0, 10.0).unwrap();
    let cancel = AtomicBool::new(true);

    let err = session
        .solve_with_cancel(&[1.0, 1.0], &[9.0, 9.0], 5.0, &cancel)
        .unwrap_err();

    assert_eq!(err, SessionError::NotSolved);
    assert!(session.solution().is_none());
}
