//! Termination conditions bounding a solve.

mod composite;
mod external;
mod iteration;
mod time;

use std::fmt::Debug;

use crate::scope::PlanScope;

pub use composite::{AndTermination, OrTermination};
pub use external::ExternalTermination;
pub use iteration::IterationTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop planning.
///
/// Engines poll this between iterations; a terminated solve that has not
/// found a path reports "not solved" rather than an error.
pub trait Termination: Send + Debug {
    /// Returns true if planning should stop.
    fn is_terminated(&self, scope: &PlanScope<'_>) -> bool;
}
