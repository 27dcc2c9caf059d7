//! Planning engines.
//!
//! A session delegates all search to a [`PlanningEngine`]. The engine receives
//! a [`PlanScope`] for the duration of one solve and reports either a path,
//! "not solved" (`Ok(None)`) when terminated first, or an error when the
//! query itself cannot be planned.
//!
//! Reference engines:
//! - [`DirectEngine`]: straight segment only
//! - [`BiTreeEngine`]: randomized trees grown from both ends

mod bitree;
mod direct;
mod shortcut;

use std::fmt::Debug;

use pathforge_config::{EngineType, PlannerConfig};
use pathforge_core::{Path, State};

use crate::error::PlannerError;
use crate::scope::PlanScope;
use crate::termination::Termination;

pub use bitree::BiTreeEngine;
pub use direct::DirectEngine;
pub use shortcut::PathShortcutter;

/// A pluggable sampling-based search capability.
///
/// # Example
///
/// ```
/// use pathforge_core::{ConfigurationSpace, Path, State, ValidityChecker};
/// use pathforge_planner::{PlanScope, PlannerError, PlanningEngine, Termination, TimeTermination};
///
/// /// Accepts the query only if the goal is the start.
/// #[derive(Debug)]
/// struct StayPut;
///
/// impl PlanningEngine for StayPut {
///     fn engine_type_name(&self) -> &'static str { "StayPut" }
///
///     fn plan(
///         &mut self,
///         _scope: &mut PlanScope<'_>,
///         start: &State,
///         goal: &State,
///         _termination: &dyn Termination,
///     ) -> Result<Option<Path>, PlannerError> {
///         Ok((start == goal).then(|| Path::from_states(vec![start.clone()])))
///     }
/// }
///
/// let space = ConfigurationSpace::from_bounds(&[(0.0, 1.0)]).unwrap();
/// let validity = ValidityChecker::default();
/// let mut scope = PlanScope::new(&space, &validity, 0.01);
/// let here = State::new(vec![0.5]);
///
/// let path = StayPut.plan(&mut scope, &here, &here, &TimeTermination::seconds(1)).unwrap();
/// assert_eq!(path.map(|p| p.len()), Some(1));
/// ```
pub trait PlanningEngine: Send + Debug {
    /// Returns the name of this engine type.
    fn engine_type_name(&self) -> &'static str;

    /// Searches for a path from `start` to `goal`.
    ///
    /// Returns `Ok(None)` if `termination` fired before a path was found.
    fn plan(
        &mut self,
        scope: &mut PlanScope<'_>,
        start: &State,
        goal: &State,
        termination: &dyn Termination,
    ) -> Result<Option<Path>, PlannerError>;

    /// Shortens `path` without making it invalid. The default keeps it as is.
    fn simplify(
        &mut self,
        _scope: &mut PlanScope<'_>,
        _path: &mut Path,
        _termination: &dyn Termination,
    ) -> Result<(), PlannerError> {
        Ok(())
    }

    /// Densifies `path` so consecutive states are at most one valid segment apart.
    fn interpolate(&self, scope: &PlanScope<'_>, path: &mut Path) {
        path.interpolate(scope.space(), scope.longest_valid_segment());
    }
}

/// Builds the engine selected by `config`.
pub fn build_engine(config: &PlannerConfig) -> Box<dyn PlanningEngine> {
    match config.engine {
        EngineType::Direct => Box::new(DirectEngine::new()),
        EngineType::BidirectionalTree => Box::new(BiTreeEngine::from_config(config)),
    }
}

/// Checks that start and goal are usable end points for a query.
pub(crate) fn check_endpoints(
    scope: &mut PlanScope<'_>,
    start: &State,
    goal: &State,
) -> Result<(), PlannerError> {
    let space = scope.space();
    if space.is_empty() {
        return Err(PlannerError::EmptySpace);
    }
    space.check_dimensions(start)?;
    space.check_dimensions(goal)?;

    if !scope.is_valid(start) {
        return Err(PlannerError::InvalidStart(format!("{:?}", start.values())));
    }
    if !scope.is_valid(goal) {
        return Err(PlannerError::InvalidGoal(format!("{:?}", goal.values())));
    }
    Ok(())
}
