//! Stopping rules combined over tuples.
//!
//! Implemented for tuples up to a fixed arity by a macro.

use super::Termination;
use crate::scope::PlanScope;

/// Fires as soon as one of its members fires.
///
/// A solve runs under the time budget or'ed with the cancel flag:
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use pathforge_planner::termination::{ExternalTermination, OrTermination, TimeTermination};
///
/// let cancel = AtomicBool::new(false);
/// let stop = OrTermination((TimeTermination::seconds(2), ExternalTermination::new(&cancel)));
/// # let _ = stop;
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Fires only once every member has fired.
#[derive(Debug)]
pub struct AndTermination<T>(pub T);

impl<T> AndTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_composite_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &PlanScope<'_>) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }

        impl<$($T),+> Termination for AndTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &PlanScope<'_>) -> bool {
                $((self.0).$idx.is_terminated(scope))&&+
            }
        }
    };
}

impl_composite_termination!(0: T0);
impl_composite_termination!(0: T0, 1: T1);
impl_composite_termination!(0: T0, 1: T1, 2: T2);
impl_composite_termination!(0: T0, 1: T1, 2: T2, 3: T3);
