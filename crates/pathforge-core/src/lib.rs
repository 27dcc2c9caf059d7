//! PathForge Core - Core types and traits for motion planning
//!
//! This crate provides the fundamental abstractions for PathForge:
//! - Bounded real-vector configuration spaces
//! - States and paths through those spaces
//! - The validity oracle capability used to reject configurations

pub mod error;
pub mod path;
pub mod space;
pub mod state;
pub mod validity;

pub use error::PathForgeError;
pub use path::Path;
pub use space::{ConfigurationSpace, Dimension};
pub use state::State;
pub use validity::{AcceptAll, DefaultValidity, RejectAll, ValidityChecker, ValidityOracle};
