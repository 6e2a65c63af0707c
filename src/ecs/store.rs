//! Entity/component store - owns all entities and their components
//!
//! Entities are opaque sequential ids; each component kind holds at most
//! one instance per entity. Queries scan the live set in creation order,
//! which makes `query(..)[0]` a stable singleton accessor (gameplay code
//! relies on this for "the player").

use ahash::{AHashMap, AHashSet};

use crate::core::types::EntityId;
use crate::ecs::components::{
    Ai, Collider, Component, ComponentKind, Cooldown, Corpse, Decay, Defense, Experience,
    ExitMarker, Facing, Health, Inventory, Mana, Monster, Player, Position, Regen, Velocity,
    Weapon,
};

/// Generates a typed accessor pair for one component variant
macro_rules! component_accessor {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self, id: EntityId) -> Option<&$ty> {
            match self.get_component(id, ComponentKind::$variant) {
                Some(Component::$variant(inner)) => Some(inner),
                _ => None,
            }
        }

        pub fn $get_mut(&mut self, id: EntityId) -> Option<&mut $ty> {
            match self.get_component_mut(id, ComponentKind::$variant) {
                Some(Component::$variant(inner)) => Some(inner),
                _ => None,
            }
        }
    };
}

/// The store containing all entities and components
pub struct Store {
    next_id: u64,
    /// Live entities in creation order; the query contract depends on it
    live: Vec<EntityId>,
    live_set: AHashSet<EntityId>,
    storages: AHashMap<ComponentKind, AHashMap<EntityId, Component>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live: Vec::new(),
            live_set: AHashSet::new(),
            storages: AHashMap::new(),
        }
    }

    /// Allocate a new entity id
    ///
    /// Ids strictly increase and are never reused, even after removal.
    pub fn create_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.live.push(id);
        self.live_set.insert(id);
        id
    }

    /// Remove an entity and purge it from every component kind
    ///
    /// Idempotent; removing an unknown or already-removed id is a no-op.
    /// After this returns, no storage holds a component owned by `id`.
    pub fn remove_entity(&mut self, id: EntityId) {
        if !self.live_set.remove(&id) {
            return;
        }
        self.live.retain(|&e| e != id);
        for storage in self.storages.values_mut() {
            storage.remove(&id);
        }
    }

    /// Insert or overwrite the single instance of the component's kind
    ///
    /// Deliberately permissive about `id`: components may be attached
    /// before an entity is live in gameplay terms, and downstream code
    /// relies on that attach-before-activate ordering.
    pub fn add_component(&mut self, id: EntityId, component: Component) {
        let kind = component.kind();
        self.storages.entry(kind).or_default().insert(id, component);
    }

    pub fn get_component(&self, id: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.storages.get(&kind)?.get(&id)
    }

    pub fn get_component_mut(&mut self, id: EntityId, kind: ComponentKind) -> Option<&mut Component> {
        self.storages.get_mut(&kind)?.get_mut(&id)
    }

    /// Detach one component kind from an entity, returning it if present
    pub fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> Option<Component> {
        self.storages.get_mut(&kind)?.remove(&id)
    }

    pub fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.storages
            .get(&kind)
            .map(|s| s.contains_key(&id))
            .unwrap_or(false)
    }

    pub fn is_live(&self, id: EntityId) -> bool {
        self.live_set.contains(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.live.len()
    }

    /// Every live entity holding all listed kinds, in creation order
    ///
    /// Full scan over the live set; entity counts stay in the low
    /// hundreds so this is cheaper than maintaining per-query indices.
    /// The result is an owned snapshot: mutating the store while
    /// iterating it cannot corrupt storage. Whether entities created
    /// during such iteration appear is unspecified (they do not, since
    /// the snapshot is taken up front).
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        self.live
            .iter()
            .copied()
            .filter(|&id| kinds.iter().all(|&k| self.has_component(id, k)))
            .collect()
    }

    component_accessor!(position, position_mut, Position, Position);
    component_accessor!(velocity, velocity_mut, Velocity, Velocity);
    component_accessor!(facing, facing_mut, Facing, Facing);
    component_accessor!(health, health_mut, Health, Health);
    component_accessor!(mana, mana_mut, Mana, Mana);
    component_accessor!(experience, experience_mut, Experience, Experience);
    component_accessor!(collider, collider_mut, Collider, Collider);
    component_accessor!(ai, ai_mut, Ai, Ai);
    component_accessor!(cooldown, cooldown_mut, Cooldown, Cooldown);
    component_accessor!(weapon, weapon_mut, Weapon, Weapon);
    component_accessor!(defense, defense_mut, Defense, Defense);
    component_accessor!(inventory, inventory_mut, Inventory, Inventory);
    component_accessor!(decay, decay_mut, Decay, Decay);
    component_accessor!(regen, regen_mut, Regen, Regen);
    component_accessor!(player, player_mut, Player, Player);
    component_accessor!(monster, monster_mut, Monster, Monster);
    component_accessor!(corpse, corpse_mut, Corpse, Corpse);
    component_accessor!(exit_marker, exit_marker_mut, ExitMarker, ExitMarker);
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Health, Position};

    #[test]
    fn test_ids_strictly_increase_and_never_recycle() {
        let mut store = Store::new();
        let a = store.create_entity();
        let b = store.create_entity();
        assert!(b > a);

        store.remove_entity(a);
        let c = store.create_entity();
        assert!(c > b);
    }

    #[test]
    fn test_query_returns_creation_order() {
        let mut store = Store::new();
        let e1 = store.create_entity();
        let e2 = store.create_entity();
        let e3 = store.create_entity();

        store.add_component(e1, Component::Health(Health::full(10.0)));
        store.add_component(e2, Component::Health(Health::full(10.0)));
        store.add_component(e3, Component::Position(Position::new(0.0, 0.0)));

        assert_eq!(store.query(&[ComponentKind::Health]), vec![e1, e2]);

        store.remove_entity(e1);
        assert_eq!(store.query(&[ComponentKind::Health]), vec![e2]);
        assert!(store.get_component(e1, ComponentKind::Health).is_none());
    }

    #[test]
    fn test_query_intersects_all_kinds() {
        let mut store = Store::new();
        let both = store.create_entity();
        let only_pos = store.create_entity();

        store.add_component(both, Component::Position(Position::new(1.0, 1.0)));
        store.add_component(both, Component::Health(Health::full(10.0)));
        store.add_component(only_pos, Component::Position(Position::new(2.0, 2.0)));

        assert_eq!(
            store.query(&[ComponentKind::Position, ComponentKind::Health]),
            vec![both]
        );
    }

    #[test]
    fn test_remove_entity_is_idempotent() {
        let mut store = Store::new();
        let e = store.create_entity();
        store.add_component(e, Component::Health(Health::full(10.0)));

        store.remove_entity(e);
        store.remove_entity(e);

        assert_eq!(store.entity_count(), 0);
        assert!(!store.is_live(e));
    }

    #[test]
    fn test_add_component_overwrites_single_instance() {
        let mut store = Store::new();
        let e = store.create_entity();
        store.add_component(e, Component::Health(Health::full(10.0)));
        store.add_component(e, Component::Health(Health::full(50.0)));

        assert_eq!(store.health(e).unwrap().max, 50.0);
    }

    #[test]
    fn test_attach_before_activate_is_permitted() {
        // Components may be attached to an id the store has not seen;
        // downstream factories rely on this ordering.
        let mut store = Store::new();
        let ghost = EntityId(999);
        store.add_component(ghost, Component::Position(Position::new(5.0, 5.0)));
        assert!(store.position(ghost).is_some());
        // Not live, so queries never surface it
        assert!(store.query(&[ComponentKind::Position]).is_empty());
    }

    #[test]
    fn test_missing_lookup_returns_absent() {
        let mut store = Store::new();
        let e = store.create_entity();
        assert!(store.get_component(e, ComponentKind::Weapon).is_none());
        assert!(store.weapon(e).is_none());
    }

    #[test]
    fn test_mutation_during_query_iteration_is_safe() {
        let mut store = Store::new();
        let ids: Vec<_> = (0..5)
            .map(|_| {
                let e = store.create_entity();
                store.add_component(e, Component::Health(Health::full(10.0)));
                e
            })
            .collect();

        for id in store.query(&[ComponentKind::Health]) {
            // Removing mid-iteration must not corrupt the store
            store.remove_entity(id);
        }

        assert_eq!(store.entity_count(), 0);
        for id in ids {
            assert!(store.health(id).is_none());
        }
    }

    #[test]
    fn test_remove_component_detaches_one_kind() {
        let mut store = Store::new();
        let e = store.create_entity();
        store.add_component(e, Component::Health(Health::full(10.0)));
        store.add_component(e, Component::Position(Position::new(0.0, 0.0)));

        let removed = store.remove_component(e, ComponentKind::Health);
        assert!(matches!(removed, Some(Component::Health(_))));
        assert!(store.health(e).is_none());
        assert!(store.position(e).is_some());
    }
}
