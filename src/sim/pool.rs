//! Typed entity pools
//!
//! Each pool is an ordered collection keyed by [`EntityId`]. Ids are handed
//! out monotonically by the game state, so appending keeps the pool sorted and
//! lookups can binary search. Removal is idempotent: unregistering an id that
//! is already gone is a no-op.

use serde::{Deserialize, Serialize};

/// Stable handle to a pooled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Anything that can live in a [`Pool`]
pub trait Pooled {
    fn id(&self) -> EntityId;
}

/// Ordered, duplicate-free collection of entities
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Pooled> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: EntityId) -> Result<usize, usize> {
        self.items.binary_search_by_key(&id, |e| e.id())
    }

    /// Add an entity. Returns false (and drops nothing) if the id is taken.
    pub fn register(&mut self, entity: T) -> bool {
        match self.position(entity.id()) {
            Ok(_) => false,
            Err(at) => {
                self.items.insert(at, entity);
                true
            }
        }
    }

    /// Remove an entity, returning it if it was still registered
    pub fn unregister(&mut self, id: EntityId) -> Option<T> {
        self.position(id).ok().map(|at| self.items.remove(at))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.position(id).is_ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.position(id).ok().map(|at| &self.items[at])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.position(id).ok().map(move |at| &mut self.items[at])
    }

    /// Snapshot of the current ids, safe to walk while the pool changes
    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().map(|e| e.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Destroy everything. Returns how many entities were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        n
    }
}
