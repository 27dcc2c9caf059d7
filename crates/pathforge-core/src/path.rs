//! Geometric paths: ordered sequences of states.

use crate::error::{PathForgeError, Result};
use crate::space::ConfigurationSpace;
use crate::state::State;

/// An ordered sequence of states from a start to a goal.
///
/// # Example
///
/// ```
/// use pathforge_core::{ConfigurationSpace, Path, State};
///
/// let space = ConfigurationSpace::from_bounds(&[(0.0, 10.0)]).unwrap();
/// let mut path = Path::from_states(vec![State::new(vec![0.0]), State::new(vec![4.0])]);
///
/// path.interpolate(&space, 1.0);
/// assert_eq!(path.len(), 5);
/// assert_eq!(path.length(&space), 4.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    states: Vec<State>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_states(states: Vec<State>) -> Self {
        Self { states }
    }

    pub fn push(&mut self, state: State) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn reverse(&mut self) {
        self.states.reverse();
    }

    /// Removes the states strictly between `from` and `to`.
    pub fn remove_between(&mut self, from: usize, to: usize) {
        if to > from + 1 && to <= self.states.len() {
            self.states.drain(from + 1..to);
        }
    }

    /// Sum of the distances between consecutive states.
    pub fn length(&self, space: &ConfigurationSpace) -> f64 {
        self.states
            .windows(2)
            .map(|w| space.distance(&w[0], &w[1]))
            .sum()
    }

    /// Inserts intermediate states so no segment is longer than `longest_segment`.
    ///
    /// A non-positive or non-finite `longest_segment` leaves the path unchanged.
    pub fn interpolate(&mut self, space: &ConfigurationSpace, longest_segment: f64) {
        if self.states.len() < 2 || longest_segment <= 0.0 || !longest_segment.is_finite() {
            return;
        }

        let mut dense = Vec::with_capacity(self.states.len());
        for pair in self.states.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let segments = space.segment_count(from, to, longest_segment);
            dense.push(from.clone());
            for k in 1..segments {
                dense.push(space.interpolate(from, to, k as f64 / segments as f64));
            }
        }
        if let Some(last) = self.states.last() {
            dense.push(last.clone());
        }
        self.states = dense;
    }

    /// Writes the states into `out` in row-major order.
    ///
    /// `out[i * dimensions + j]` receives the j-th coordinate of the i-th state.
    ///
    /// # Errors
    ///
    /// Returns [`PathForgeError::DimensionMismatch`] if `out` is not exactly
    /// `len() * dimensions` long or a state has a different length. Nothing is
    /// written on error.
    pub fn write_row_major(&self, dimensions: usize, out: &mut [f64]) -> Result<()> {
        let expected = self.states.len() * dimensions;
        if out.len() != expected {
            return Err(PathForgeError::DimensionMismatch {
                expected,
                actual: out.len(),
            });
        }
        if let Some(bad) = self.states.iter().find(|s| s.len() != dimensions) {
            return Err(PathForgeError::DimensionMismatch {
                expected: dimensions,
                actual: bad.len(),
            });
        }

        for (row, state) in out.chunks_exact_mut(dimensions.max(1)).zip(&self.states) {
            row.copy_from_slice(state);
        }
        Ok(())
    }
}

impl FromIterator<State> for Path {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        Self::from_states(iter.into_iter().collect())
    }
}
