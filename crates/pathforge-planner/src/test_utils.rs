//! Test utilities for pathforge-planner
//!
//! Re-exports fixtures from pathforge-test and adds planner-specific helpers.

use std::sync::Arc;

use pathforge_core::{ConfigurationSpace, DefaultValidity, State, ValidityChecker, ValidityOracle};

pub use pathforge_test::oracles::{BoxObstacle, CountingOracle};
pub use pathforge_test::spaces::{cube, square};

/// The `[0, 1] x [0, 1]` plane.
pub fn unit_plane() -> ConfigurationSpace {
    square(1.0)
}

pub fn accept_all() -> ValidityChecker {
    ValidityChecker::new(None, DefaultValidity::Accept)
}

pub fn reject_all() -> ValidityChecker {
    ValidityChecker::new(None, DefaultValidity::Reject)
}

pub fn checker(oracle: impl ValidityOracle + 'static) -> ValidityChecker {
    ValidityChecker::with_oracle(Arc::new(oracle))
}

pub fn state(values: &[f64]) -> State {
    State::from(values)
}
