//! Helpers shared by unit tests.

use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serialize tests that change the process working directory.
///
/// The working directory is process-wide state; tests that call
/// `set_current_dir` must hold this lock for their whole body or they race
/// with each other under the parallel test runner.
pub fn lock_current_dir() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
