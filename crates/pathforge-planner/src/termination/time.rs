//! Wall-clock budget for a query.

use std::time::Duration;

use super::Termination;
use crate::scope::PlanScope;

/// Fires once the query has used up its time budget.
///
/// The clock starts at [`PlanScope::start_planning`]; a scope that was never
/// started does not fire. Simplification runs under the same instance, so it
/// only gets what planning left over.
///
/// ```
/// use pathforge_planner::termination::TimeTermination;
///
/// let budget = TimeTermination::millis(250);
/// assert_eq!(budget.limit().as_millis(), 250);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &PlanScope<'_>) -> bool {
        scope.elapsed().is_some_and(|spent| spent >= self.limit)
    }
}
