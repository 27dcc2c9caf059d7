//! Validity oracle fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};

use pathforge_core::ValidityOracle;

/// Axis-aligned box obstacle: states inside the box (inclusive) are invalid.
#[derive(Debug, Clone)]
pub struct BoxObstacle {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl BoxObstacle {
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Self {
        assert_eq!(min.len(), max.len(), "obstacle corners must match");
        Self { min, max }
    }

    pub fn contains(&self, state: &[f64]) -> bool {
        state.len() == self.min.len()
            && state
                .iter()
                .zip(self.min.iter().zip(&self.max))
                .all(|(v, (lo, hi))| v >= lo && v <= hi)
    }
}

impl ValidityOracle for BoxObstacle {
    fn is_valid(&self, state: &[f64]) -> bool {
        !self.contains(state)
    }
}

/// Vertical wall across a 2D plane with one opening.
///
/// The wall occupies `x` in `[wall_min, wall_max]`; states in the wall are
/// invalid unless `y` lies in `[gap_min, gap_max]`.
#[derive(Debug, Clone)]
pub struct WallWithGap {
    pub wall_min: f64,
    pub wall_max: f64,
    pub gap_min: f64,
    pub gap_max: f64,
}

impl WallWithGap {
    /// Wall at `x` in `[4, 6]` with an opening at `y` in `[8, 10]` on a `[0, 10]` plane.
    pub fn standard() -> Self {
        Self {
            wall_min: 4.0,
            wall_max: 6.0,
            gap_min: 8.0,
            gap_max: 10.0,
        }
    }
}

impl ValidityOracle for WallWithGap {
    fn is_valid(&self, state: &[f64]) -> bool {
        let (x, y) = (state[0], state[1]);
        let in_wall = x >= self.wall_min && x <= self.wall_max;
        !in_wall || (y >= self.gap_min && y <= self.gap_max)
    }
}

/// Wraps an oracle and counts how often it is consulted.
#[derive(Debug, Default)]
pub struct CountingOracle<O> {
    inner: O,
    calls: AtomicUsize,
}

impl<O> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<O: ValidityOracle> ValidityOracle for CountingOracle<O> {
    fn is_valid(&self, state: &[f64]) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.is_valid(state)
    }
}

/// Oracle that panics on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingOracle;

impl ValidityOracle for PanickingOracle {
    fn is_valid(&self, _state: &[f64]) -> bool {
        panic!("validity oracle failure");
    }
}
