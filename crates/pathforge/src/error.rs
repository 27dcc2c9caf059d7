//! Error types for planning sessions

use pathforge_core::PathForgeError;
use pathforge_planner::PlannerError;
use thiserror::Error;

/// Errors reported by [`Session`](crate::Session) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The session's space is still in use elsewhere.
    #[error("session is in use: {leases} outstanding lease(s)")]
    ConcurrentOwnership { leases: usize },

    /// Dimension bounds are not finite or `min > max`.
    #[error("invalid range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    /// No session exists yet.
    #[error("no session")]
    NoSession,

    /// Caller-supplied shape does not match the stored solution.
    #[error("precondition mismatch: {0}")]
    PreconditionMismatch(String),

    /// No path is available.
    #[error("not solved")]
    NotSolved,

    /// A query vector has the wrong number of components.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The configuration space has no dimensions.
    #[error("configuration space has no dimensions")]
    EmptySpace,

    /// The time budget is not finite and positive.
    #[error("invalid time budget: {0}")]
    InvalidTimeBudget(f64),

    /// The validity-checking resolution is NaN.
    #[error("invalid validity checking resolution: {0}")]
    InvalidResolution(f64),

    /// The engine rejected the query or failed while planning.
    #[error("engine error: {0}")]
    Engine(String),
}

/// Discriminant of a [`SessionError`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionErrorKind {
    ConcurrentOwnership,
    InvalidRange,
    NoSession,
    PreconditionMismatch,
    NotSolved,
    DimensionMismatch,
    EmptySpace,
    InvalidTimeBudget,
    InvalidResolution,
    Engine,
}

impl SessionError {
    pub fn kind(&self) -> SessionErrorKind {
        match self {
            Self::ConcurrentOwnership { .. } => SessionErrorKind::ConcurrentOwnership,
            Self::InvalidRange { .. } => SessionErrorKind::InvalidRange,
            Self::NoSession => SessionErrorKind::NoSession,
            Self::PreconditionMismatch(_) => SessionErrorKind::PreconditionMismatch,
            Self::NotSolved => SessionErrorKind::NotSolved,
            Self::DimensionMismatch { .. } => SessionErrorKind::DimensionMismatch,
            Self::EmptySpace => SessionErrorKind::EmptySpace,
            Self::InvalidTimeBudget(_) => SessionErrorKind::InvalidTimeBudget,
            Self::InvalidResolution(_) => SessionErrorKind::InvalidResolution,
            Self::Engine(_) => SessionErrorKind::Engine,
        }
    }
}

impl From<PathForgeError> for SessionError {
    fn from(err: PathForgeError) -> Self {
        match err {
            PathForgeError::InvalidRange { min, max } => Self::InvalidRange { min, max },
            PathForgeError::DimensionMismatch { expected, actual } => {
                Self::DimensionMismatch { expected, actual }
            }
        }
    }
}

impl From<PlannerError> for SessionError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::EmptySpace => Self::EmptySpace,
            PlannerError::Core(core) => core.into(),
            other => Self::Engine(other.to_string()),
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
