//! Insertion-ordered in-memory table.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use docvault_core::traits::{Entity, Repository};
use docvault_core::{AppError, AppResult};

/// A table of entities keyed by id that remembers insertion order.
///
/// Listings are returned in the order rows were created, which keeps child
/// and file listings stable across reads.
#[derive(Debug, Clone)]
pub struct MemoryTable<E: Entity> {
    rows: HashMap<E::Id, E>,
    order: Vec<E::Id>,
}

impl<E: Entity> Default for MemoryTable<E> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<E: Entity> MemoryTable<E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<E: Entity> FromIterator<E> for MemoryTable<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut table = Self::new();
        for entity in iter {
            let id = entity.id();
            if table.rows.insert(id, entity).is_none() {
                table.order.push(id);
            }
        }
        table
    }
}

impl<E: Entity> Repository<E> for MemoryTable<E> {
    fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>> {
        Ok(self.rows.get(id).cloned())
    }

    fn find_all(&self) -> AppResult<Vec<E>> {
        Ok(self.iter().cloned().collect())
    }

    fn filter(&self, predicate: &dyn Fn(&E) -> bool) -> AppResult<Vec<E>> {
        Ok(self.iter().filter(|e| predicate(*e)).cloned().collect())
    }

    fn find_one(&self, predicate: &dyn Fn(&E) -> bool) -> AppResult<Option<E>> {
        Ok(self.iter().find(|e| predicate(*e)).cloned())
    }

    fn create(&mut self, entity: E) -> AppResult<E> {
        let id = entity.id();
        if self.rows.contains_key(&id) {
            return Err(AppError::store(format!("{} {id} already stored", E::KIND)));
        }
        self.rows.insert(id, entity.clone());
        self.order.push(id);
        Ok(entity)
    }

    fn update(&mut self, entity: E) -> AppResult<E> {
        let id = entity.id();
        match self.rows.get_mut(&id) {
            Some(row) => {
                *row = entity.clone();
                Ok(entity)
            }
            None => Err(AppError::store(format!("{} {id} is not stored", E::KIND))),
        }
    }

    fn delete(&mut self, id: &E::Id) -> AppResult<bool> {
        if self.rows.remove(id).is_none() {
            return Ok(false);
        }
        self.order.retain(|existing| existing != id);
        Ok(true)
    }

    fn count(&self) -> AppResult<u64> {
        Ok(self.order.len() as u64)
    }
}

impl<E: Entity + Serialize> Serialize for MemoryTable<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, E: Entity + Deserialize<'de>> Deserialize<'de> for MemoryTable<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<E>::deserialize(deserializer)?;
        Ok(rows.into_iter().collect())
    }
}
