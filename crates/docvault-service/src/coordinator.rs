//! The single global lock guarding the entity store.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use docvault_database::EntityStore;

/// Cloneable handle to the lock-guarded store.
///
/// Every service holds one of these; the store itself is never handed to
/// callers. Guards release on drop, so every exit path (including `?`)
/// unlocks.
#[derive(Debug)]
pub struct SharedStore<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EntityStore> SharedStore<S> {
    /// Wrap a store in the global lock.
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Acquire the shared lock for a read-only operation.
    pub async fn read(&self) -> RwLockReadGuard<'_, S> {
        self.inner.read().await
    }

    /// Acquire the exclusive lock for a mutating operation.
    pub async fn write(&self) -> RwLockWriteGuard<'_, S> {
        self.inner.write().await
    }
}
