//! Error types for PathForge

use thiserror::Error;

/// Main error type for PathForge core operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathForgeError {
    /// Dimension bounds that cannot be represented
    #[error("Invalid range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    /// A vector or buffer does not match the expected dimension count
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result type alias for PathForge operations
pub type Result<T> = std::result::Result<T, PathForgeError>;
