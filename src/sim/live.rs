//! The live-entity collection
//!
//! Set semantics keyed by id, stored in spawn order so iteration is stable
//! for determinism.

use super::entity::{Entity, EntityId};

#[derive(Debug, Clone, Default)]
pub struct LiveSet {
    entities: Vec<Entity>,
}

impl LiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly spawned entity. Ids must be unique within the set.
    pub fn insert(&mut self, entity: Entity) {
        debug_assert!(
            !self.contains(entity.id),
            "duplicate live entity id {}",
            entity.id
        );
        self.entities.push(entity);
    }

    /// Take an entity out of play. `None` if it was already resolved.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Swap in the next frame's entities, handing back the previous ones
    pub(crate) fn replace(&mut self, next: Vec<Entity>) -> Vec<Entity> {
        std::mem::replace(&mut self.entities, next)
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }
}
