//! Lock helpers shared by the stores.
//!
//! Every write critical section is a plain publish that cannot panic halfway,
//! so a poisoned lock still guards a consistent value and is recovered.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[allow(clippy::redundant_pub_crate)]
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

#[allow(clippy::redundant_pub_crate)]
pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
