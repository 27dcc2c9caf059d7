//! The planning session.
//!
//! A [`Session`] owns one configuration space, one engine, an optional
//! validity oracle and the outcome of the last solve. Creating a session
//! plays the role of the first reset.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pathforge_config::PlannerConfig;
use pathforge_core::{ConfigurationSpace, Path, State, ValidityChecker, ValidityOracle};
use pathforge_planner::{
    ExternalTermination, OrTermination, PlanScope, PlanStatistics, PlannerError, PlanningEngine,
    Termination, TimeTermination,
};
use tracing::{debug, info, warn};

use crate::engine_factory::EngineFactory;
use crate::error::{Result, SessionError};
use crate::lease::{LeaseCounter, SessionActivity, SolvingGuard, SpaceLease};

/// Result of the most recent solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOutcome {
    pub solved: bool,
    /// Number of states in the stored path, -1 when unsolved.
    pub step_count: i32,
}

impl SolveOutcome {
    /// No solve attempted, or the last one failed.
    pub const UNSOLVED: Self = Self {
        solved: false,
        step_count: -1,
    };

    fn solved(steps: usize) -> Self {
        Self {
            solved: true,
            step_count: i32::try_from(steps).unwrap_or(i32::MAX),
        }
    }
}

impl Default for SolveOutcome {
    fn default() -> Self {
        Self::UNSOLVED
    }
}

/// A single motion-planning session.
///
/// # Example
///
/// ```
/// use pathforge::Session;
///
/// let mut session = Session::default();
/// session.add_dimension(0.0, 10.0).unwrap();
/// session.add_dimension(0.0, 10.0).unwrap();
///
/// let steps = session.solve(&[0.0, 0.0], &[10.0, 10.0], 1.0).unwrap();
///
/// let mut out = vec![0.0; steps * 2];
/// session.copy_solution(steps, 2, &mut out).unwrap();
/// assert_eq!(&out[..2], &[0.0, 0.0]);
/// assert_eq!(&out[out.len() - 2..], &[10.0, 10.0]);
/// ```
#[derive(Debug)]
pub struct Session {
    config: PlannerConfig,
    factory: EngineFactory,
    engine: Box<dyn PlanningEngine>,
    space: Arc<ConfigurationSpace>,
    validity: ValidityChecker,
    resolution: f64,
    outcome: SolveOutcome,
    solution: Option<Path>,
    statistics: PlanStatistics,
    generation: u64,
    leases: LeaseCounter,
    solving: Arc<AtomicBool>,
}

impl Session {
    /// Creates a session whose engine is selected by `config`.
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_engine_factory(config, EngineFactory::Configured)
    }

    pub fn with_engine_factory(config: PlannerConfig, factory: EngineFactory) -> Self {
        let engine = factory.create(&config);
        let validity = ValidityChecker::new(None, config.default_validity);
        let resolution = default_resolution(&config);
        debug!(
            event = "session_created",
            engine = engine.engine_type_name(),
            resolution = resolution,
        );
        Self {
            config,
            factory,
            engine,
            space: Arc::new(ConfigurationSpace::new()),
            validity,
            resolution,
            outcome: SolveOutcome::UNSOLVED,
            solution: None,
            statistics: PlanStatistics::new(),
            generation: 0,
            leases: LeaseCounter::default(),
            solving: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Discards all session state and starts over with an empty space.
    ///
    /// # Errors
    ///
    /// [`SessionError::ConcurrentOwnership`] while a [`SpaceLease`] is alive;
    /// nothing changes in that case.
    pub fn reset(&mut self) -> Result<()> {
        let leases = self.leases.outstanding();
        if leases > 0 {
            warn!(event = "reset_refused", leases = leases);
            return Err(SessionError::ConcurrentOwnership { leases });
        }

        self.engine = self.factory.create(&self.config);
        self.space = Arc::new(ConfigurationSpace::new());
        self.validity = ValidityChecker::new(None, self.config.default_validity);
        self.resolution = default_resolution(&self.config);
        self.statistics = PlanStatistics::new();
        self.clear_outcome();
        self.generation += 1;

        info!(
            event = "session_reset",
            generation = self.generation,
            engine = self.engine.engine_type_name(),
        );
        Ok(())
    }

    /// Appends a dimension `[min, max]` to the space.
    ///
    /// Any previous solution is dropped, since it no longer matches the space.
    pub fn add_dimension(&mut self, min: f64, max: f64) -> Result<()> {
        if let Err(err) = Arc::make_mut(&mut self.space).add_dimension(min, max) {
            warn!(event = "dimension_rejected", min = min, max = max);
            return Err(err.into());
        }
        self.clear_outcome();
        debug!(
            event = "dimension_added",
            index = self.space.dimension_count() - 1,
            min = min,
            max = max,
        );
        Ok(())
    }

    pub fn dimension_count(&self) -> usize {
        self.space.dimension_count()
    }

    pub fn space(&self) -> &ConfigurationSpace {
        &self.space
    }

    /// Installs `oracle`, replacing any previous one.
    pub fn set_validity_checker(&mut self, oracle: Arc<dyn ValidityOracle>) {
        self.validity = ValidityChecker::new(Some(oracle), self.config.default_validity);
        debug!(event = "validity_checker_set");
    }

    /// Removes the oracle; the default validity policy applies again.
    pub fn clear_validity_checker(&mut self) {
        self.validity = ValidityChecker::new(None, self.config.default_validity);
        debug!(event = "validity_checker_cleared");
    }

    pub fn has_validity_checker(&self) -> bool {
        self.validity.has_oracle()
    }

    /// Sets the spacing of motion checks as a fraction of the maximum extent.
    ///
    /// Values outside `[0, 1]` are clamped. Returns the stored value.
    pub fn set_validity_checking_resolution(&mut self, resolution: f64) -> Result<f64> {
        if resolution.is_nan() {
            return Err(SessionError::InvalidResolution(resolution));
        }
        self.resolution = resolution.clamp(0.0, 1.0);
        debug!(event = "resolution_set", resolution = self.resolution);
        Ok(self.resolution)
    }

    pub fn validity_checking_resolution(&self) -> f64 {
        self.resolution
    }

    /// Plans from `initial` to `goal` within `time_budget` seconds.
    ///
    /// On success the path is simplified with whatever budget remains, then
    /// interpolated at the session resolution. Returns its number of states.
    ///
    /// # Errors
    ///
    /// - [`SessionError::EmptySpace`] if no dimension was added
    /// - [`SessionError::DimensionMismatch`] if a vector has the wrong length
    /// - [`SessionError::InvalidTimeBudget`] unless the budget is finite and positive
    /// - [`SessionError::NotSolved`] if no path was found in time
    /// - [`SessionError::Engine`] if the engine rejected the query or panicked
    ///
    /// Any error leaves the session without a solution.
    pub fn solve(&mut self, initial: &[f64], goal: &[f64], time_budget: f64) -> Result<usize> {
        let cancel = AtomicBool::new(false);
        self.solve_with_cancel(initial, goal, time_budget, &cancel)
    }

    /// Like [`solve`](Self::solve), but also stops early once `cancel` is set.
    pub fn solve_with_cancel(
        &mut self,
        initial: &[f64],
        goal: &[f64],
        time_budget: f64,
        cancel: &AtomicBool,
    ) -> Result<usize> {
        self.clear_outcome();
        let budget = match self.validate_query(initial, goal, time_budget) {
            Ok(budget) => budget,
            Err(err) => {
                warn!(event = "solve_rejected", error = %err);
                return Err(err);
            }
        };

        let _lease = self.leases.acquire();
        let solving = Arc::clone(&self.solving);
        let _solving = SolvingGuard::enter(&solving);

        info!(
            event = "solve_start",
            engine = self.engine.engine_type_name(),
            dimensions = self.space.dimension_count() as u64,
            time_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
            has_oracle = self.validity.has_oracle(),
        );

        let query = Query {
            start: State::from(initial),
            goal: State::from(goal),
            budget,
            cancel,
        };
        let started = Instant::now();
        let engine = self.engine.as_mut();
        let (space, validity, config) = (&*self.space, &self.validity, &self.config);
        let resolution = self.resolution;
        let caught = panic::catch_unwind(AssertUnwindSafe(|| {
            run_query(engine, space, validity, config, resolution, &query)
        }));

        let (result, statistics) = match caught {
            Ok((planned, statistics)) => (planned.map_err(SessionError::from), statistics),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                // The engine may be left half-updated; start from a fresh one.
                self.engine = self.factory.create(&self.config);
                (
                    Err(SessionError::Engine(format!("engine panicked: {message}"))),
                    PlanStatistics::new(),
                )
            }
        };
        let duration_ms = started.elapsed().as_millis() as u64;
        self.statistics = statistics;

        match result.and_then(|path| path.ok_or(SessionError::NotSolved)) {
            Ok(path) => {
                let steps = path.len();
                self.outcome = SolveOutcome::solved(steps);
                self.solution = Some(path);
                info!(
                    event = "solve_end",
                    solved = true,
                    steps = steps as u64,
                    duration_ms = duration_ms,
                    validity_checks = self.statistics.validity_checks,
                    states_sampled = self.statistics.states_sampled,
                    tree_states = self.statistics.tree_states,
                );
                Ok(steps)
            }
            Err(err) => {
                info!(
                    event = "solve_end",
                    solved = false,
                    steps = -1i64,
                    duration_ms = duration_ms,
                    validity_checks = self.statistics.validity_checks,
                    states_sampled = self.statistics.states_sampled,
                    error = %err,
                );
                Err(err)
            }
        }
    }

    pub fn outcome(&self) -> SolveOutcome {
        self.outcome
    }

    /// The path found by the last solve, if it succeeded.
    pub fn solution(&self) -> Option<&Path> {
        self.solution.as_ref()
    }

    /// `(steps, dimensions)` of the stored path.
    pub fn solution_shape(&self) -> Option<(usize, usize)> {
        self.solution
            .as_ref()
            .map(|path| (path.len(), self.space.dimension_count()))
    }

    /// Copies the stored path into `out`, row-major.
    ///
    /// `steps` and `dimensions` must match [`solution_shape`](Self::solution_shape)
    /// and `out` must hold exactly `steps * dimensions` values. Nothing is
    /// written on error.
    pub fn copy_solution(&self, steps: usize, dimensions: usize, out: &mut [f64]) -> Result<()> {
        let path = self.solution.as_ref().ok_or(SessionError::NotSolved)?;
        if steps != path.len() {
            return Err(SessionError::PreconditionMismatch(format!(
                "requested {steps} steps, solution has {}",
                path.len()
            )));
        }
        let actual_dimensions = self.space.dimension_count();
        if dimensions != actual_dimensions {
            return Err(SessionError::PreconditionMismatch(format!(
                "requested {dimensions} dimensions, space has {actual_dimensions}"
            )));
        }
        if out.len() != steps * dimensions {
            return Err(SessionError::PreconditionMismatch(format!(
                "buffer holds {} values, {} required",
                out.len(),
                steps * dimensions
            )));
        }
        path.write_row_major(dimensions, out)?;
        Ok(())
    }

    /// Number of resets since the session was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counters from the last solve.
    pub fn statistics(&self) -> &PlanStatistics {
        &self.statistics
    }

    /// Takes a lease on the current space. Reset fails until it is dropped.
    pub fn lease_space(&self) -> SpaceLease {
        SpaceLease::new(Arc::clone(&self.space), self.leases.acquire())
    }

    pub fn activity(&self) -> SessionActivity {
        SessionActivity::new(Arc::clone(&self.solving), self.leases.clone())
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn engine_type_name(&self) -> &'static str {
        self.engine.engine_type_name()
    }

    fn clear_outcome(&mut self) {
        self.outcome = SolveOutcome::UNSOLVED;
        self.solution = None;
    }

    fn validate_query(&self, initial: &[f64], goal: &[f64], time_budget: f64) -> Result<Duration> {
        let expected = self.space.dimension_count();
        if expected == 0 {
            return Err(SessionError::EmptySpace);
        }
        for values in [initial, goal] {
            if values.len() != expected {
                return Err(SessionError::DimensionMismatch {
                    expected,
                    actual: values.len(),
                });
            }
        }
        if !time_budget.is_finite() || time_budget <= 0.0 {
            return Err(SessionError::InvalidTimeBudget(time_budget));
        }
        // Budgets past what `Duration` holds never expire anyway.
        Ok(Duration::try_from_secs_f64(time_budget).unwrap_or(Duration::MAX))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

struct Query<'a> {
    start: State,
    goal: State,
    budget: Duration,
    cancel: &'a AtomicBool,
}

/// Plans, simplifies and interpolates one query.
fn run_query(
    engine: &mut dyn PlanningEngine,
    space: &ConfigurationSpace,
    validity: &ValidityChecker,
    config: &PlannerConfig,
    resolution: f64,
    query: &Query<'_>,
) -> (std::result::Result<Option<Path>, PlannerError>, PlanStatistics) {
    let mut scope = match config.random_seed {
        Some(seed) => PlanScope::with_seed(space, validity, resolution, seed),
        None => PlanScope::new(space, validity, resolution),
    };
    scope.start_planning();

    let termination = OrTermination((
        TimeTermination::new(query.budget),
        ExternalTermination::new(query.cancel),
    ));

    let planned = engine.plan(&mut scope, &query.start, &query.goal, &termination);
    let planning_duration = scope.elapsed().unwrap_or_default();
    scope.statistics_mut().planning_duration = planning_duration;

    let mut path = match planned {
        Ok(Some(path)) => path,
        other => return (other, scope.into_statistics()),
    };

    // Simplification shares the solve deadline, so it only gets what is left.
    if config.simplification.enabled && !termination.is_terminated(&scope) {
        let started = Instant::now();
        let simplified = engine.simplify(&mut scope, &mut path, &termination);
        scope.statistics_mut().simplification_duration = started.elapsed();
        if let Err(err) = simplified {
            return (Err(err), scope.into_statistics());
        }
    }

    if config.interpolation.enabled {
        engine.interpolate(&scope, &mut path);
    }
    scope.statistics_mut().path_states = path.len();

    (Ok(Some(path)), scope.into_statistics())
}

fn default_resolution(config: &PlannerConfig) -> f64 {
    let resolution = config.validity_checking_resolution;
    if resolution.is_nan() {
        pathforge_config::DEFAULT_VALIDITY_CHECKING_RESOLUTION
    } else {
        resolution.clamp(0.0, 1.0)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod proptests;
