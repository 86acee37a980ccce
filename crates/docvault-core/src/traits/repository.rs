//! Generic repository trait for entity store access.

use std::fmt::Display;
use std::hash::Hash;

use crate::result::AppResult;

/// A persisted domain record with a typed primary key.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Primary key type.
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;

    /// Human readable entity name used in log lines and store errors.
    const KIND: &'static str;

    /// Return the primary key.
    fn id(&self) -> Self::Id;
}

/// Generic CRUD repository trait.
///
/// Repositories are only ever touched while the caller holds the global
/// store lock, so the methods are synchronous. Entity-specific queries are
/// expressed with [`Repository::filter`] or defined on the store.
pub trait Repository<E: Entity>: Send + Sync {
    /// Find an entity by its primary key.
    fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>>;

    /// Return every entity in insertion order.
    fn find_all(&self) -> AppResult<Vec<E>>;

    /// Return every entity matching `predicate`, in insertion order.
    fn filter(&self, predicate: &dyn Fn(&E) -> bool) -> AppResult<Vec<E>>;

    /// Return the first entity matching `predicate`.
    fn find_one(&self, predicate: &dyn Fn(&E) -> bool) -> AppResult<Option<E>> {
        Ok(self.filter(predicate)?.into_iter().next())
    }

    /// Persist a new entity and return it.
    fn create(&mut self, entity: E) -> AppResult<E>;

    /// Replace an existing entity and return the stored version.
    fn update(&mut self, entity: E) -> AppResult<E>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    fn delete(&mut self, id: &E::Id) -> AppResult<bool>;

    /// Count total entities.
    fn count(&self) -> AppResult<u64>;
}
