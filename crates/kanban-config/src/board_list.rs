//! List of currently existing boards.
//!
//! The list has its own lock so board index reads are never blocked by global
//! config writes. Operations that must agree with the per-board config map go
//! through [`crate::BoardConfigStore`], which takes its own lock first and
//! this one second.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::sync;

/// Ordered identifiers of existing boards.
#[derive(Debug, Default)]
pub struct BoardListStore {
    boards: RwLock<Arc<Vec<String>>>,
}

impl BoardListStore {
    /// Create a store holding `boards`.
    #[must_use]
    pub fn new(boards: Vec<String>) -> Self {
        Self {
            boards: RwLock::new(Arc::new(boards)),
        }
    }

    /// Snapshot of the current list. Later writes do not affect it.
    #[must_use]
    pub fn get(&self) -> Arc<Vec<String>> {
        Arc::clone(&*sync::read(&self.boards))
    }

    /// Whether `id` is currently listed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        sync::read(&self.boards).iter().any(|board| board == id)
    }

    /// Replace the whole list.
    pub fn set(&self, boards: Vec<String>) {
        *sync::write(&self.boards) = Arc::new(boards);
    }

    /// Remove `id` from the list. Returns `false` when it was not listed.
    pub fn remove(&self, id: &str) -> bool {
        remove_id(&mut self.lock(), id)
    }

    pub(crate) fn lock(&self) -> RwLockWriteGuard<'_, Arc<Vec<String>>> {
        sync::write(&self.boards)
    }
}

/// Remove every occurrence of `id`, copying the list only if readers still
/// hold the previous snapshot.
pub(crate) fn remove_id(boards: &mut Arc<Vec<String>>, id: &str) -> bool {
    if !boards.iter().any(|board| board == id) {
        return false;
    }
    Arc::make_mut(boards).retain(|board| board != id);
    true
}

/// Append `id` unless it is already listed.
pub(crate) fn add_id(boards: &mut Arc<Vec<String>>, id: &str) {
    if !boards.iter().any(|board| board == id) {
        Arc::make_mut(boards).push(id.to_string());
    }
}
