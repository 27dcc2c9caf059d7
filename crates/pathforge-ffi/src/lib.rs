//! C-linkage bindings for PathForge.
//!
//! Exposes one process-wide planning session to native hosts. Every entry
//! point reports failure through its return value (`false` or `-1`); errors
//! and panics never cross the boundary.
//!
//! The slot is guarded by a mutex that entry points only ever `try_lock`, so
//! a call made from inside a validity callback (or racing a solve on another
//! thread) fails instead of deadlocking.
//!
//! Before the first [`Reset`] there is no session: [`AddDimension`] creates
//! the default one, every other call returns its failure value.

#![allow(non_snake_case)]

use std::ffi::c_int;
use std::panic::{self, AssertUnwindSafe};
use std::slice;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use pathforge::{PlannerConfig, Session, SessionError, ValidityOracle};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Configuration file read when a session is created.
pub const CONFIG_FILE: &str = "pathforge.toml";

/// Validity callback: receives a state and its length, returns non-zero if valid.
pub type ValidityCallback = extern "C" fn(state: *const f64, length: c_int) -> c_int;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

#[derive(Debug, Error)]
enum CallError {
    #[error("session is busy")]
    Busy,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Adapts a C callback to [`ValidityOracle`].
#[derive(Debug, Clone, Copy)]
struct ForeignOracle {
    callback: ValidityCallback,
}

impl ValidityOracle for ForeignOracle {
    fn is_valid(&self, state: &[f64]) -> bool {
        let Ok(length) = c_int::try_from(state.len()) else {
            return false;
        };
        (self.callback)(state.as_ptr(), length) != 0
    }
}

fn lock_slot() -> Result<MutexGuard<'static, Option<Session>>, CallError> {
    match SESSION.try_lock() {
        Ok(guard) => Ok(guard),
        Err(TryLockError::WouldBlock) => Err(CallError::Busy),
        // A panic inside a previous call was already reported; the session
        // itself keeps a consistent state between operations.
        Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
    }
}

/// Runs `body` on the slot, mapping any error or panic to `failure`.
fn guarded<T>(
    operation: &'static str,
    failure: T,
    body: impl FnOnce(&mut Option<Session>) -> Result<T, SessionError>,
) -> T {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut slot = lock_slot()?;
        body(&mut slot).map_err(CallError::from)
    }));

    match result {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            warn!(event = "call_failed", operation = operation, error = %err);
            failure
        }
        Err(_) => {
            error!(event = "call_panicked", operation = operation);
            failure
        }
    }
}

fn live(slot: &mut Option<Session>) -> Result<&mut Session, SessionError> {
    slot.as_mut().ok_or(SessionError::NoSession)
}

fn new_session() -> Session {
    let config = PlannerConfig::load(CONFIG_FILE).unwrap_or_else(|err| {
        debug!(event = "config_defaults", file = CONFIG_FILE, reason = %err);
        PlannerConfig::default()
    });
    Session::new(config)
}

fn to_c_int(value: usize) -> c_int {
    c_int::try_from(value).unwrap_or(c_int::MAX)
}

fn non_negative(value: c_int, what: &str) -> Result<usize, SessionError> {
    usize::try_from(value)
        .map_err(|_| SessionError::PreconditionMismatch(format!("negative {what}: {value}")))
}

/// Creates the session, or resets it to an empty space.
///
/// Returns false if the session is in use.
#[no_mangle]
pub extern "C" fn Reset() -> bool {
    guarded("Reset", false, |slot| {
        match slot {
            Some(session) => session.reset()?,
            None => *slot = Some(new_session()),
        }
        Ok(true)
    })
}

/// Appends a dimension `[min, max]`, creating the default session if needed.
#[no_mangle]
pub extern "C" fn AddDimension(min: f64, max: f64) -> bool {
    guarded("AddDimension", false, |slot| {
        slot.get_or_insert_with(new_session)
            .add_dimension(min, max)?;
        Ok(true)
    })
}

/// Number of dimensions, or -1 without a session.
#[no_mangle]
pub extern "C" fn DimensionCount() -> c_int {
    guarded("DimensionCount", -1, |slot| {
        Ok(to_c_int(live(slot)?.dimension_count()))
    })
}

/// Installs `checker`, or removes the current one when null.
#[no_mangle]
pub extern "C" fn SetValidityChecker(checker: Option<ValidityCallback>) -> bool {
    guarded("SetValidityChecker", false, |slot| {
        let session = live(slot)?;
        match checker {
            Some(callback) => session.set_validity_checker(Arc::new(ForeignOracle { callback })),
            None => session.clear_validity_checker(),
        }
        Ok(true)
    })
}

#[no_mangle]
pub extern "C" fn HasSetValidityChecker() -> bool {
    guarded("HasSetValidityChecker", false, |slot| {
        Ok(slot.as_ref().is_some_and(Session::has_validity_checker))
    })
}

/// Sets the validity-checking resolution, clamped to `[0, 1]`.
#[no_mangle]
pub extern "C" fn SetValidityCheckerResolution(resolution: f64) -> bool {
    guarded("SetValidityCheckerResolution", false, |slot| {
        live(slot)?.set_validity_checking_resolution(resolution)?;
        Ok(true)
    })
}

/// Alias of [`SetValidityCheckerResolution`].
#[no_mangle]
pub extern "C" fn SetValidityCheckingResolution(resolution: f64) -> bool {
    SetValidityCheckerResolution(resolution)
}

/// Plans from `initial` to `goal` within `time_limit` seconds.
///
/// Writes the number of path states to `steps`, or -1 on failure.
///
/// # Safety
///
/// `initial` and `goal` must each point to `length` readable values, and
/// `steps` must be null or point to a writable `c_int`.
#[no_mangle]
pub unsafe extern "C" fn Solve(
    initial: *const f64,
    goal: *const f64,
    length: c_int,
    time_limit: f64,
    steps: *mut c_int,
) -> bool {
    if steps.is_null() {
        warn!(event = "call_failed", operation = "Solve", error = "null steps");
        return false;
    }
    // SAFETY: checked non-null above; the caller guarantees it is writable.
    unsafe { *steps = -1 };

    let solved = guarded("Solve", None, |slot| {
        let session = live(slot)?;
        let length = non_negative(length, "length")?;
        let expected = session.dimension_count();
        if length != expected {
            return Err(SessionError::DimensionMismatch {
                expected,
                actual: length,
            });
        }
        if initial.is_null() || goal.is_null() {
            return Err(SessionError::PreconditionMismatch(
                "null query vector".to_string(),
            ));
        }
        // SAFETY: non-null, and the caller guarantees `length` readable values;
        // `length` was checked against the space before any view is formed.
        let (initial, goal) = unsafe {
            (
                slice::from_raw_parts(initial, length),
                slice::from_raw_parts(goal, length),
            )
        };
        let count = session.solve(initial, goal, time_limit)?;
        Ok(Some(to_c_int(count)))
    });

    match solved {
        Some(count) => {
            // SAFETY: as above.
            unsafe { *steps = count };
            true
        }
        None => false,
    }
}

/// Copies the last solution into `solution`, row-major.
///
/// `steps` and `dimensions` must match the stored path. Nothing is written
/// on failure.
///
/// # Safety
///
/// `solution` must point to `steps * dimensions` writable values.
#[no_mangle]
pub unsafe extern "C" fn GetSolution(steps: c_int, dimensions: c_int, solution: *mut f64) -> bool {
    guarded("GetSolution", false, |slot| {
        let session = live(slot)?;
        let steps = non_negative(steps, "steps")?;
        let dimensions = non_negative(dimensions, "dimensions")?;

        // The buffer is only viewed once its size is known to match.
        match session.solution_shape() {
            None => return Err(SessionError::NotSolved),
            Some(shape) if shape != (steps, dimensions) => {
                return Err(SessionError::PreconditionMismatch(format!(
                    "requested {steps}x{dimensions}, solution is {}x{}",
                    shape.0, shape.1
                )));
            }
            Some(_) => {}
        }
        if solution.is_null() {
            return Err(SessionError::PreconditionMismatch(
                "null solution buffer".to_string(),
            ));
        }

        // SAFETY: non-null, and the caller guarantees `steps * dimensions` values.
        let out = unsafe { slice::from_raw_parts_mut(solution, steps * dimensions) };
        session.copy_solution(steps, dimensions, out)?;
        Ok(true)
    })
}

/// Installs the console log subscriber. Returns false if another subscriber
/// was installed first.
#[no_mangle]
pub extern "C" fn InitLogging() -> bool {
    panic::catch_unwind(pathforge::console::init).unwrap_or(false)
}
