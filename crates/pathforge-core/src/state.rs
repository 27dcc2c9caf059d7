//! Configuration vectors.

use std::ops::{Deref, Index};

/// A single configuration: one coordinate per space dimension.
///
/// Component order follows the order in which dimensions were added to the
/// [`ConfigurationSpace`](crate::ConfigurationSpace).
///
/// # Example
///
/// ```
/// use pathforge_core::State;
///
/// let state = State::new(vec![0.5, -2.0]);
/// assert_eq!(state.len(), 2);
/// assert_eq!(state[1], -2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    values: Vec<f64>,
}

impl State {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Deref for State {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl Index<usize> for State {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl From<Vec<f64>> for State {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for State {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}
