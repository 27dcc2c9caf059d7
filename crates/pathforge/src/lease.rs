//! Usage tracking that guards session reset.
//!
//! A session counts its outstanding leases explicitly. External holders of
//! the configuration space and an in-flight solve each hold one; reset is
//! refused while the count is non-zero.

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use pathforge_core::ConfigurationSpace;

#[derive(Debug, Clone, Default)]
pub(crate) struct LeaseCounter(Arc<AtomicUsize>);

impl LeaseCounter {
    pub(crate) fn acquire(&self) -> LeaseToken {
        self.0.fetch_add(1, Ordering::SeqCst);
        LeaseToken(Arc::clone(&self.0))
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Releases its lease on drop.
#[derive(Debug)]
pub(crate) struct LeaseToken(Arc<AtomicUsize>);

impl Drop for LeaseToken {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Read access to a session's configuration space that blocks reset while alive.
///
/// The lease sees the space as it was when the lease was taken; dimensions
/// added afterwards only show up in new leases.
///
/// # Example
///
/// ```
/// use pathforge::Session;
///
/// let mut session = Session::default();
/// session.add_dimension(0.0, 1.0).unwrap();
///
/// let lease = session.lease_space();
/// assert_eq!(lease.dimension_count(), 1);
/// assert!(session.reset().is_err());
///
/// drop(lease);
/// assert!(session.reset().is_ok());
/// ```
pub struct SpaceLease {
    space: Arc<ConfigurationSpace>,
    _token: LeaseToken,
}

impl SpaceLease {
    pub(crate) fn new(space: Arc<ConfigurationSpace>, token: LeaseToken) -> Self {
        Self {
            space,
            _token: token,
        }
    }

    pub fn space(&self) -> &ConfigurationSpace {
        &self.space
    }
}

impl Deref for SpaceLease {
    type Target = ConfigurationSpace;

    fn deref(&self) -> &ConfigurationSpace {
        &self.space
    }
}

impl fmt::Debug for SpaceLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceLease")
            .field("dimensions", &self.space.dimension_count())
            .finish()
    }
}

/// Cloneable view of what a session is currently doing.
///
/// Can be handed to other threads, for example to watch a long solve.
#[derive(Debug, Clone)]
pub struct SessionActivity {
    solving: Arc<AtomicBool>,
    leases: LeaseCounter,
}

impl SessionActivity {
    pub(crate) fn new(solving: Arc<AtomicBool>, leases: LeaseCounter) -> Self {
        Self { solving, leases }
    }

    /// True while a solve is running.
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Number of outstanding leases, including one for an in-flight solve.
    pub fn outstanding_leases(&self) -> usize {
        self.leases.outstanding()
    }
}

/// Raises the solving flag for its lifetime.
pub(crate) struct SolvingGuard<'a>(&'a AtomicBool);

impl<'a> SolvingGuard<'a> {
    pub(crate) fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for SolvingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
