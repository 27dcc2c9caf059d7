//! Configuration space builders.

use pathforge_core::ConfigurationSpace;

/// The `[0, size] x [0, size]` plane.
pub fn square(size: f64) -> ConfigurationSpace {
    cube(size, 2)
}

/// `dimensions` copies of `[0, size]`.
pub fn cube(size: f64, dimensions: usize) -> ConfigurationSpace {
    let mut space = ConfigurationSpace::new();
    for _ in 0..dimensions {
        space
            .add_dimension(0.0, size)
            .expect("fixture bounds are valid");
    }
    space
}

/// The mixed-range three-dimensional space used by the end-to-end scenarios.
pub fn mixed_ranges() -> ConfigurationSpace {
    ConfigurationSpace::from_bounds(&[(-1.0, 1.0), (-59.0, -33.0), (0.0, 500.0)])
        .expect("fixture bounds are valid")
}
