//! Bounded real-vector configuration spaces.
//!
//! A [`ConfigurationSpace`] is an ordered list of [`Dimension`]s. The order in
//! which dimensions are added defines the component order of every
//! [`State`] planned over the space.

use crate::error::{PathForgeError, Result};
use crate::state::State;

/// Closed interval `[min, max]` for one configuration component.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    min: f64,
    max: f64,
}

impl Dimension {
    /// Creates a dimension with the given bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PathForgeError::InvalidRange`] if either bound is not finite
    /// or `min > max`.
    ///
    /// # Example
    ///
    /// ```
    /// use pathforge_core::Dimension;
    ///
    /// assert!(Dimension::new(-1.0, 1.0).is_ok());
    /// assert!(Dimension::new(1.0, -1.0).is_err());
    /// assert!(Dimension::new(0.0, f64::INFINITY).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PathForgeError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn extent(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// An ordered sequence of bounded dimensions.
///
/// # Example
///
/// ```
/// use pathforge_core::{ConfigurationSpace, State};
///
/// let mut space = ConfigurationSpace::new();
/// space.add_dimension(0.0, 10.0).unwrap();
/// space.add_dimension(0.0, 10.0).unwrap();
///
/// assert_eq!(space.dimension_count(), 2);
/// assert!(space.satisfies_bounds(&State::new(vec![5.0, 5.0])));
/// assert!(!space.satisfies_bounds(&State::new(vec![5.0, 11.0])));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigurationSpace {
    dimensions: Vec<Dimension>,
}

impl ConfigurationSpace {
    /// Creates an empty space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a space from `(min, max)` pairs, in order.
    pub fn from_bounds(bounds: &[(f64, f64)]) -> Result<Self> {
        let mut space = Self::new();
        for &(min, max) in bounds {
            space.add_dimension(min, max)?;
        }
        Ok(space)
    }

    /// Appends a dimension. Existing dimensions are unaffected.
    pub fn add_dimension(&mut self, min: f64, max: f64) -> Result<()> {
        self.dimensions.push(Dimension::new(min, max)?);
        Ok(())
    }

    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, index: usize) -> Option<&Dimension> {
        self.dimensions.get(index)
    }

    /// Length of the diagonal of the bounding box.
    pub fn maximum_extent(&self) -> f64 {
        self.dimensions
            .iter()
            .map(|d| d.extent() * d.extent())
            .sum::<f64>()
            .sqrt()
    }

    /// Checks that `values` has one component per dimension.
    pub fn check_dimensions(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.dimensions.len() {
            return Err(PathForgeError::DimensionMismatch {
                expected: self.dimensions.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    /// Returns true if the state has the right length and lies inside every bound.
    pub fn satisfies_bounds(&self, state: &[f64]) -> bool {
        state.len() == self.dimensions.len()
            && self
                .dimensions
                .iter()
                .zip(state)
                .all(|(d, &v)| d.contains(v))
    }

    /// Euclidean distance between two states.
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }

    /// Linear interpolation: `t = 0` yields `from`, `t = 1` yields `to`.
    pub fn interpolate(&self, from: &[f64], to: &[f64], t: f64) -> State {
        State::new(from.iter().zip(to).map(|(a, b)| a + (b - a) * t).collect())
    }

    /// Number of segments of at most `longest_segment` needed to cover `a -> b`.
    ///
    /// Always at least one.
    pub fn segment_count(&self, a: &[f64], b: &[f64], longest_segment: f64) -> usize {
        if longest_segment <= 0.0 || !longest_segment.is_finite() {
            return 1;
        }
        let segments = (self.distance(a, b) / longest_segment).ceil();
        if segments.is_finite() && segments >= 1.0 {
            segments as usize
        } else {
            1
        }
    }
}
