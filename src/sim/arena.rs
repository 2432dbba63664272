//! Live-entity collection
//!
//! Generational slots give stable handles for weak references (orbit targets),
//! while a separate order list preserves insertion order for the update pass,
//! pair tests and draw order. Removal only happens in [`EntityArena::compact`].

use slotmap::SlotMap;

use super::entity::{Entity, EntityId};

#[derive(Debug, Clone, Default)]
pub struct EntityArena {
    slots: SlotMap<EntityId, Entity>,
    order: Vec<EntityId>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append an entity; it goes after every existing entry
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = self.slots.insert(entity);
        self.order.push(id);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(id)
    }

    /// Mutable access to two distinct entities
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        self.slots.get_disjoint_mut([a, b]).map(|[x, y]| (x, y))
    }

    /// Handles in insertion order
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    /// Entities in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (EntityId, &Entity)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.slots.get(id).map(|e| (id, e)))
    }

    /// Drop every destroyed entity, keeping survivors in order. Returns the count removed.
    pub fn compact(&mut self) -> usize {
        let before = self.order.len();
        let slots = &mut self.slots;
        self.order.retain(|&id| {
            let keep = slots.get(id).is_some_and(|e| !e.body.destroyed);
            if !keep {
                slots.remove(id);
            }
            keep
        });
        before - self.order.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}
