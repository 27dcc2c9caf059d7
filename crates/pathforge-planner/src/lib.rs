//! PathForge Planner
//!
//! This crate provides the planning side of a session:
//! - The [`PlanningEngine`] trait the session delegates to
//! - [`PlanScope`]: space, validity checks, randomness and counters for one solve
//! - Termination conditions bounding a solve
//! - Statistics collected while planning
//! - Two reference engines: [`DirectEngine`] and [`BiTreeEngine`]

pub mod engine;
pub mod error;
pub mod scope;
pub mod statistics;
pub mod termination;

#[cfg(test)]
mod test_utils;

pub use engine::{build_engine, BiTreeEngine, DirectEngine, PathShortcutter, PlanningEngine};
pub use error::PlannerError;
pub use scope::{PlanScope, MIN_RESOLUTION};
pub use statistics::PlanStatistics;
pub use termination::{
    AndTermination, ExternalTermination, IterationTermination, OrTermination, Termination,
    TimeTermination,
};
