//! PathForge - a single-session motion-planning facade
//!
//! A [`Session`] holds a bounded real-vector configuration space, an optional
//! validity oracle and one planning engine, and answers start-to-goal queries
//! within a time budget.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use pathforge::Session;
//!
//! let mut session = Session::default();
//! session.add_dimension(0.0, 10.0).unwrap();
//! session.add_dimension(0.0, 10.0).unwrap();
//!
//! // A wall at x in [4, 6] with an opening above y = 8.
//! session.set_validity_checker(Arc::new(|s: &[f64]| s[0] < 4.0 || s[0] > 6.0 || s[1] > 8.0));
//!
//! let steps = session.solve(&[1.0, 1.0], &[9.0, 1.0], 5.0).unwrap();
//! assert_eq!(session.solution_shape(), Some((steps, 2)));
//! ```
//!
//! Enable the `console` feature for colored solve logs via `console::init()`.

pub mod engine_factory;
pub mod error;
pub mod lease;
pub mod session;

pub use engine_factory::EngineFactory;
pub use error::{SessionError, SessionErrorKind};
pub use lease::{SessionActivity, SpaceLease};
pub use session::{Session, SolveOutcome};

pub use pathforge_config::{DefaultValidity, EngineType, PlannerConfig};
pub use pathforge_core::{AcceptAll, ConfigurationSpace, Path, RejectAll, State, ValidityOracle};
pub use pathforge_planner::PlanStatistics;

#[cfg(feature = "console")]
pub use pathforge_console as console;
