//! Errors raised by planning engines.

use pathforge_core::PathForgeError;
use thiserror::Error;

/// Failure of a planning engine call.
///
/// Running out of time is not an error: engines report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// The space has no dimensions to plan over.
    #[error("Configuration space has no dimensions")]
    EmptySpace,

    /// The start state is out of bounds or rejected by the validity check.
    #[error("Invalid start state: {0}")]
    InvalidStart(String),

    /// The goal state is out of bounds or rejected by the validity check.
    #[error("Invalid goal state: {0}")]
    InvalidGoal(String),

    #[error(transparent)]
    Core(#[from] PathForgeError),
}
