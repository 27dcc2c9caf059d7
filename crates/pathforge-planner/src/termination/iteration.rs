//! Bound on engine iterations.

use super::Termination;
use crate::scope::PlanScope;

/// Fires after a fixed number of engine iterations.
///
/// Makes seeded searches stop at the same point on every run, which wall
/// clock budgets cannot.
#[derive(Debug, Clone)]
pub struct IterationTermination {
    limit: u64,
}

impl IterationTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for IterationTermination {
    fn is_terminated(&self, scope: &PlanScope<'_>) -> bool {
        scope.iteration_count() >= self.limit
    }
}
