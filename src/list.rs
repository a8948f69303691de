//! The ordered entity list shared by both engines.
//!
//! Insertion order is the only display order. Entities never change after
//! they are appended; the only other mutation is removal by identity.

use std::sync::Arc;

use crate::identity::Identity;

/// A read-only view of a list at one point in time.
pub type Snapshot<T> = Arc<[T]>;

/// Anything stored in an [`EntityList`].
pub trait Entity: Clone {
    fn identity(&self) -> Identity;
}

/// Ordered, append-only-except-for-explicit-delete sequence.
#[derive(Debug, Clone)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the end.
    pub fn push(&mut self, entity: T) {
        debug_assert!(!self.contains(entity.identity()), "identity reused");
        self.items.push(entity);
    }

    /// Remove the entity with `id`, keeping the rest in order.
    /// Returns `None` if it isn't there.
    pub fn remove(&mut self, id: Identity) -> Option<T> {
        let pos = self.items.iter().position(|e| e.identity() == id)?;
        Some(self.items.remove(pos))
    }

    pub fn contains(&self, id: Identity) -> bool {
        self.items.iter().any(|e| e.identity() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        self.items.iter().cloned().collect()
    }
}

/// Trim user input. Whitespace-only input is not text.
pub fn normalize(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
