pub mod chat;
pub mod todo;

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::identity::Identity;

/// What a form submits into. main.rs and the dashboard only know this trait.
///
/// Submissions are total: blank input is ignored and returns `None`.
pub trait Engine: Send + Sync {
    /// Accept raw user text. Returns the identity of the new entity, if any.
    fn submit(&self, raw: &str) -> Option<Identity>;

    /// Number of entities currently in the list.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Engine state is never left half-mutated, so a poisoned lock is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
