//! Shortcut-based path simplification.

use pathforge_config::SimplificationConfig;
use pathforge_core::Path;
use rand::Rng;

use crate::scope::PlanScope;
use crate::termination::Termination;

/// Shortens paths by replacing sub-paths with straight valid segments.
///
/// Two passes:
/// 1. Random shortcuts: pick two non-adjacent states and drop everything in
///    between if the segment joining them is valid.
/// 2. Redundant vertex removal: walk the path once and drop each state whose
///    neighbours can see each other.
#[derive(Debug, Clone)]
pub struct PathShortcutter {
    max_attempts: usize,
}

impl PathShortcutter {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn from_config(config: &SimplificationConfig) -> Self {
        Self::new(config.max_shortcut_attempts)
    }

    /// Runs both passes. Returns true if any state was removed.
    pub fn simplify(
        &self,
        scope: &mut PlanScope<'_>,
        path: &mut Path,
        termination: &dyn Termination,
    ) -> bool {
        let before = path.len();
        self.random_shortcuts(scope, path, termination);
        self.remove_redundant(scope, path, termination);
        path.len() < before
    }

    fn random_shortcuts(
        &self,
        scope: &mut PlanScope<'_>,
        path: &mut Path,
        termination: &dyn Termination,
    ) {
        for _ in 0..self.max_attempts {
            let n = path.len();
            if n < 3 || termination.is_terminated(scope) {
                return;
            }
            let from = scope.rng().random_range(0..n - 2);
            let to = scope.rng().random_range(from + 2..n);

            let states = path.states();
            if scope.check_motion(&states[from], &states[to]) {
                path.remove_between(from, to);
            }
        }
    }

    fn remove_redundant(
        &self,
        scope: &mut PlanScope<'_>,
        path: &mut Path,
        termination: &dyn Termination,
    ) {
        let mut i = 0;
        while i + 2 < path.len() {
            if termination.is_terminated(scope) {
                return;
            }
            let states = path.states();
            if scope.check_motion(&states[i], &states[i + 2]) {
                path.remove_between(i, i + 2);
            } else {
                i += 1;
            }
        }
    }
}

impl Default for PathShortcutter {
    fn default() -> Self {
        Self::from_config(&SimplificationConfig::default())
    }
}
