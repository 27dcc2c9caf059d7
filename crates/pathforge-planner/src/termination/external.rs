//! Caller-driven cancellation.

use std::sync::atomic::{AtomicBool, Ordering};

use super::Termination;
use crate::scope::PlanScope;

/// Fires when the caller raises a cancel flag.
///
/// The session passes the flag it received in `solve_with_cancel`; a flag
/// raised before the query starts stops it before any connection attempt.
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use pathforge_planner::termination::ExternalTermination;
///
/// let cancel = AtomicBool::new(false);
/// let stop = ExternalTermination::new(&cancel);
/// cancel.store(true, Ordering::SeqCst);
/// # let _ = stop;
/// ```
#[derive(Debug)]
pub struct ExternalTermination<'a> {
    cancel: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    pub fn new(cancel: &'a AtomicBool) -> Self {
        Self { cancel }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self, _scope: &PlanScope<'_>) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}
