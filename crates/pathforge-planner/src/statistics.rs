//! Planning statistics.
//!
//! Counters collected by a [`PlanScope`](crate::PlanScope) during one solve,
//! including validity check counts, sampling effort and timing.

use std::time::Duration;

/// Statistics for a single solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanStatistics {
    /// Number of single-state validity checks performed.
    pub validity_checks: u64,
    /// Number of motion (segment) checks performed.
    pub motion_checks: u64,
    /// Number of states drawn from the space.
    pub states_sampled: u64,
    /// Number of states added to search trees.
    pub tree_states: u64,
    /// Number of engine iterations.
    pub iterations: u64,
    /// Time spent until the engine returned.
    pub planning_duration: Duration,
    /// Time spent simplifying the found path.
    pub simplification_duration: Duration,
    /// Number of states in the final path, 0 if none.
    pub path_states: usize,
}

impl PlanStatistics {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns validity checks per second of planning time.
    pub fn validity_checks_per_second(&self) -> u64 {
        let secs = self.planning_duration.as_secs_f64();
        if secs > 0.0 {
            (self.validity_checks as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Total time spent planning and simplifying.
    pub fn total_duration(&self) -> Duration {
        self.planning_duration + self.simplification_duration
    }
}
