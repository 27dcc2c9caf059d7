//! Path and state assertions.

use pathforge_core::{ConfigurationSpace, Path, ValidityOracle};

/// Asserts that two coordinate vectors agree component-wise within `tolerance`.
pub fn assert_states_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "state lengths differ");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "component {i}: {a} differs from {e} by more than {tolerance}"
        );
    }
}

/// Asserts that every state of `path` is inside `space` and accepted by `oracle`.
pub fn assert_path_valid(path: &Path, space: &ConfigurationSpace, oracle: &dyn ValidityOracle) {
    for (i, state) in path.states().iter().enumerate() {
        assert!(space.satisfies_bounds(state), "state {i} out of bounds: {state:?}");
        assert!(oracle.is_valid(state), "state {i} rejected: {state:?}");
    }
}

/// Asserts that consecutive states are at most `longest` apart.
pub fn assert_segments_at_most(path: &Path, space: &ConfigurationSpace, longest: f64) {
    for (i, pair) in path.states().windows(2).enumerate() {
        let d = space.distance(&pair[0], &pair[1]);
        assert!(d <= longest + 1e-9, "segment {i} has length {d} > {longest}");
    }
}
