//! Shared test fixtures for PathForge crates.
//!
//! This crate provides data types and pure functions for testing.
//! It only depends on `pathforge-core` to avoid circular dependencies.
//!
//! - [`spaces`] - Configuration space builders
//! - [`oracles`] - Validity oracles: obstacles, walls, counting and panicking wrappers
//! - [`assertions`] - Path and state assertions
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! pathforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use pathforge_test::oracles::{BoxObstacle, WallWithGap};
//! use pathforge_test::spaces::square;
//! ```

pub mod assertions;
pub mod oracles;
pub mod spaces;

// Re-export commonly used types at crate root for convenience
pub use assertions::{assert_path_valid, assert_segments_at_most, assert_states_close};
pub use oracles::{BoxObstacle, CountingOracle, PanickingOracle, WallWithGap};
pub use spaces::{cube, square};
