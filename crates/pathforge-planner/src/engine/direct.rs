//! Straight-line engine.

use pathforge_core::{Path, State};
use tracing::debug;

use super::{check_endpoints, PlanningEngine};
use crate::error::PlannerError;
use crate::scope::PlanScope;
use crate::termination::Termination;

/// Solves a query only if the straight segment from start to goal is valid.
///
/// Useful for open spaces and as a deterministic engine in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectEngine;

impl DirectEngine {
    pub fn new() -> Self {
        Self
    }
}

impl PlanningEngine for DirectEngine {
    fn engine_type_name(&self) -> &'static str {
        "Direct"
    }

    fn plan(
        &mut self,
        scope: &mut PlanScope<'_>,
        start: &State,
        goal: &State,
        termination: &dyn Termination,
    ) -> Result<Option<Path>, PlannerError> {
        check_endpoints(scope, start, goal)?;
        if termination.is_terminated(scope) {
            return Ok(None);
        }
        scope.increment_iteration();

        if scope.check_motion(start, goal) {
            debug!(event = "direct_connection", connected = true);
            Ok(Some(Path::from_states(vec![start.clone(), goal.clone()])))
        } else {
            debug!(event = "direct_connection", connected = false);
            Ok(None)
        }
    }
}
