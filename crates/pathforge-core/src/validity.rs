//! Validity oracles.
//!
//! A validity oracle decides whether a configuration is usable, for example
//! collision-free. Oracles are supplied by the caller and owned by the session
//! through an `Arc`, so they live at least as long as any solve using them.

use std::fmt;
use std::sync::Arc;

/// Predicate over configuration vectors.
///
/// Implemented for any `Fn(&[f64]) -> bool + Send + Sync`.
///
/// # Example
///
/// ```
/// use pathforge_core::ValidityOracle;
///
/// let outside_unit_disc = |state: &[f64]| state.iter().map(|v| v * v).sum::<f64>() > 1.0;
///
/// assert!(outside_unit_disc.is_valid(&[2.0, 0.0]));
/// assert!(!outside_unit_disc.is_valid(&[0.5, 0.0]));
/// ```
pub trait ValidityOracle: Send + Sync {
    /// Returns true if `state` is a valid configuration.
    fn is_valid(&self, state: &[f64]) -> bool;
}

impl<F> ValidityOracle for F
where
    F: Fn(&[f64]) -> bool + Send + Sync,
{
    fn is_valid(&self, state: &[f64]) -> bool {
        self(state)
    }
}

/// Oracle that accepts every configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ValidityOracle for AcceptAll {
    fn is_valid(&self, _state: &[f64]) -> bool {
        true
    }
}

/// Oracle that rejects every configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl ValidityOracle for RejectAll {
    fn is_valid(&self, _state: &[f64]) -> bool {
        false
    }
}

/// Answer used when no oracle is installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DefaultValidity {
    /// Every configuration is valid until an oracle is installed.
    #[default]
    Accept,

    /// Every configuration is invalid until an oracle is installed.
    Reject,
}

impl DefaultValidity {
    pub fn accepts(self) -> bool {
        matches!(self, DefaultValidity::Accept)
    }
}

/// The validity check actually applied during planning.
///
/// Delegates to the installed oracle, or falls back to the
/// [`DefaultValidity`] policy. A zero-length state is never valid.
#[derive(Clone, Default)]
pub struct ValidityChecker {
    oracle: Option<Arc<dyn ValidityOracle>>,
    default: DefaultValidity,
}

impl ValidityChecker {
    pub fn new(oracle: Option<Arc<dyn ValidityOracle>>, default: DefaultValidity) -> Self {
        Self { oracle, default }
    }

    pub fn with_oracle(oracle: Arc<dyn ValidityOracle>) -> Self {
        Self::new(Some(oracle), DefaultValidity::Accept)
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn default_validity(&self) -> DefaultValidity {
        self.default
    }

    pub fn check(&self, state: &[f64]) -> bool {
        if state.is_empty() {
            return false;
        }
        match &self.oracle {
            Some(oracle) => oracle.is_valid(state),
            None => self.default.accepts(),
        }
    }
}

impl fmt::Debug for ValidityChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidityChecker")
            .field("has_oracle", &self.oracle.is_some())
            .field("default", &self.default)
            .finish()
    }
}
