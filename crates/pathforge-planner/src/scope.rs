//! Per-solve planning scope.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pathforge_core::{ConfigurationSpace, State, ValidityChecker};

use crate::statistics::PlanStatistics;

/// Smallest resolution used for motion checks and interpolation.
///
/// A configured resolution of 0 is raised to this value so a segment is never
/// checked only at its end points.
pub const MIN_RESOLUTION: f64 = 1e-4;

/// Everything an engine may touch during one solve.
///
/// Borrows the session's space and validity check for the duration of the
/// solve and owns the random generator, the clock and the counters.
pub struct PlanScope<'a> {
    space: &'a ConfigurationSpace,
    validity: &'a ValidityChecker,
    resolution: f64,
    rng: StdRng,
    start_time: Option<Instant>,
    statistics: PlanStatistics,
}

impl<'a> PlanScope<'a> {
    pub fn new(space: &'a ConfigurationSpace, validity: &'a ValidityChecker, resolution: f64) -> Self {
        Self::with_rng(space, validity, resolution, StdRng::from_os_rng())
    }

    pub fn with_seed(
        space: &'a ConfigurationSpace,
        validity: &'a ValidityChecker,
        resolution: f64,
        seed: u64,
    ) -> Self {
        Self::with_rng(space, validity, resolution, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        space: &'a ConfigurationSpace,
        validity: &'a ValidityChecker,
        resolution: f64,
        rng: StdRng,
    ) -> Self {
        Self {
            space,
            validity,
            resolution: resolution.clamp(0.0, 1.0),
            rng,
            start_time: None,
            statistics: PlanStatistics::new(),
        }
    }

    pub fn start_planning(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn space(&self) -> &'a ConfigurationSpace {
        self.space
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Longest segment that is considered valid when both end points are.
    pub fn longest_valid_segment(&self) -> f64 {
        self.resolution.max(MIN_RESOLUTION) * self.space.maximum_extent()
    }

    /// Checks bounds and the validity oracle for one state.
    pub fn is_valid(&mut self, state: &[f64]) -> bool {
        self.statistics.validity_checks += 1;
        self.space.satisfies_bounds(state) && self.validity.check(state)
    }

    /// Checks the segment `from -> to`, assuming `from` is already known valid.
    ///
    /// Intermediate states are spaced at most [`longest_valid_segment`] apart.
    ///
    /// [`longest_valid_segment`]: Self::longest_valid_segment
    pub fn check_motion(&mut self, from: &[f64], to: &[f64]) -> bool {
        self.statistics.motion_checks += 1;
        if !self.is_valid(to) {
            return false;
        }
        let space = self.space;
        let segments = space.segment_count(from, to, self.longest_valid_segment());
        (1..segments).all(|k| {
            let state = space.interpolate(from, to, k as f64 / segments as f64);
            self.is_valid(&state)
        })
    }

    /// Draws a state uniformly from the bounding box.
    pub fn sample_uniform(&mut self) -> State {
        self.statistics.states_sampled += 1;
        let rng = &mut self.rng;
        self.space
            .dimensions()
            .iter()
            .map(|d| {
                if d.extent() > 0.0 {
                    rng.random_range(d.min()..=d.max())
                } else {
                    d.min()
                }
            })
            .collect::<Vec<_>>()
            .into()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn increment_iteration(&mut self) -> u64 {
        self.statistics.iterations += 1;
        self.statistics.iterations
    }

    pub fn iteration_count(&self) -> u64 {
        self.statistics.iterations
    }

    pub fn statistics(&self) -> &PlanStatistics {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut PlanStatistics {
        &mut self.statistics
    }

    pub fn into_statistics(self) -> PlanStatistics {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pathforge_core::{DefaultValidity, ValidityChecker};
    use pathforge_test::oracles::BoxObstacle;
    use pathforge_test::spaces::square;

    use super::*;

    #[test]
    fn test_elapsed_before_start() {
        let space = square(10.0);
        let validity = ValidityChecker::default();
        let mut scope = PlanScope::new(&space, &validity, 0.01);

        assert!(scope.elapsed().is_none());
        scope.start_planning();
        assert!(scope.elapsed().is_some());
    }

    #[test]
    fn test_is_valid_checks_bounds_and_oracle() {
        let space = square(10.0);
        let validity = ValidityChecker::new(None, DefaultValidity::Accept);
        let mut scope = PlanScope::new(&space, &validity, 0.01);

        assert!(scope.is_valid(&[5.0, 5.0]));
        assert!(!scope.is_valid(&[5.0, 10.5]));
        assert!(!scope.is_valid(&[5.0]));
        assert_eq!(scope.statistics().validity_checks, 3);
    }

    #[test]
    fn test_check_motion_detects_obstacle_between_valid_end_points() {
        let space = square(10.0);
        let obstacle = BoxObstacle::new(vec![4.0, 0.0], vec![6.0, 10.0]);
        let validity = ValidityChecker::with_oracle(Arc::new(obstacle));
        let mut scope = PlanScope::new(&space, &validity, 0.01);

        assert!(scope.is_valid(&[1.0, 5.0]));
        assert!(scope.is_valid(&[9.0, 5.0]));
        assert!(!scope.check_motion(&[1.0, 5.0], &[9.0, 5.0]));
        assert!(scope.check_motion(&[1.0, 5.0], &[3.0, 9.0]));
    }

    #[test]
    fn test_zero_resolution_uses_floor() {
        let space = square(10.0);
        let validity = ValidityChecker::default();
        let scope = PlanScope::new(&space, &validity, 0.0);

        let expected = MIN_RESOLUTION * space.maximum_extent();
        assert!((scope.longest_valid_segment() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_resolution_is_clamped() {
        let space = square(10.0);
        let validity = ValidityChecker::default();
        assert_eq!(PlanScope::new(&space, &validity, 4.0).resolution(), 1.0);
        assert_eq!(PlanScope::new(&space, &validity, -1.0).resolution(), 0.0);
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let space = ConfigurationSpace::from_bounds(&[(-1.0, 1.0), (3.0, 3.0), (0.0, 500.0)]).unwrap();
        let validity = ValidityChecker::default();
        let mut scope = PlanScope::with_seed(&space, &validity, 0.01, 42);

        for _ in 0..200 {
            let state = scope.sample_uniform();
            assert!(space.satisfies_bounds(&state));
            assert_eq!(state[1], 3.0);
        }
        assert_eq!(scope.statistics().states_sampled, 200);
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let space = square(10.0);
        let validity = ValidityChecker::default();
        let mut a = PlanScope::with_seed(&space, &validity, 0.01, 7);
        let mut b = PlanScope::with_seed(&space, &validity, 0.01, 7);

        for _ in 0..10 {
            assert_eq!(a.sample_uniform(), b.sample_uniform());
        }
    }
}
