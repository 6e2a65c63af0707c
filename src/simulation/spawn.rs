//! Entity factory: materializes spawn descriptors into store entities
//!
//! Generators only emit plain spawn records; this module owns the
//! monster catalog and assembles the component sets, including the
//! initial occupancy commit for each placed body.

use crate::core::config::SimulationConfig;
use crate::core::types::EntityId;
use crate::ecs::components::{
    Ai, Collider, Component, Cooldown, Defense, Experience, ExitMarker, Facing, Health,
    Inventory, Mana, Monster, MonsterKind, Player, Position, Regen, Velocity, Vocation, Weapon,
};
use crate::ecs::Store;
use crate::grid::Grid;
use crate::worldgen::{SpawnDescriptor, SpawnKind};

/// One loot-table row: rolled independently of every other row
#[derive(Debug, Clone, Copy)]
pub struct LootEntry {
    pub item: &'static str,
    pub chance: f64,
    pub min_count: u32,
    pub max_count: u32,
}

/// Static stats for one monster species
#[derive(Debug, Clone, Copy)]
pub struct MonsterStats {
    pub name: &'static str,
    pub health: f32,
    pub speed: f32,
    pub base_damage: f32,
    pub attack_skill: u32,
    pub armor: f32,
    pub experience_yield: u64,
    pub attack_interval: f32,
    pub loot: &'static [LootEntry],
}

pub fn monster_stats(kind: MonsterKind) -> MonsterStats {
    match kind {
        MonsterKind::Rat => MonsterStats {
            name: "rat",
            health: 20.0,
            speed: 60.0,
            base_damage: 4.0,
            attack_skill: 5,
            armor: 0.0,
            experience_yield: 5,
            attack_interval: 1.5,
            loot: &[
                LootEntry { item: "cheese", chance: 0.4, min_count: 1, max_count: 1 },
                LootEntry { item: "gold coin", chance: 0.6, min_count: 1, max_count: 4 },
            ],
        },
        MonsterKind::Snake => MonsterStats {
            name: "snake",
            health: 30.0,
            speed: 50.0,
            base_damage: 6.0,
            attack_skill: 8,
            armor: 1.0,
            experience_yield: 10,
            attack_interval: 1.4,
            loot: &[],
        },
        MonsterKind::Wolf => MonsterStats {
            name: "wolf",
            health: 45.0,
            speed: 90.0,
            base_damage: 9.0,
            attack_skill: 12,
            armor: 1.0,
            experience_yield: 18,
            attack_interval: 1.2,
            loot: &[
                LootEntry { item: "wolf pelt", chance: 0.5, min_count: 1, max_count: 1 },
                LootEntry { item: "meat", chance: 0.7, min_count: 1, max_count: 2 },
            ],
        },
        MonsterKind::Skeleton => MonsterStats {
            name: "skeleton",
            health: 65.0,
            speed: 55.0,
            base_damage: 13.0,
            attack_skill: 18,
            armor: 4.0,
            experience_yield: 35,
            attack_interval: 1.3,
            loot: &[
                LootEntry { item: "bone", chance: 0.8, min_count: 1, max_count: 3 },
                LootEntry { item: "gold coin", chance: 0.5, min_count: 2, max_count: 10 },
                LootEntry { item: "rusty sword", chance: 0.1, min_count: 1, max_count: 1 },
            ],
        },
        MonsterKind::Orc => MonsterStats {
            name: "orc",
            health: 90.0,
            speed: 70.0,
            base_damage: 17.0,
            attack_skill: 25,
            armor: 6.0,
            experience_yield: 60,
            attack_interval: 1.1,
            loot: &[
                LootEntry { item: "gold coin", chance: 0.8, min_count: 5, max_count: 20 },
                LootEntry { item: "orcish axe", chance: 0.15, min_count: 1, max_count: 1 },
            ],
        },
        MonsterKind::Troll => MonsterStats {
            name: "troll",
            health: 160.0,
            speed: 45.0,
            base_damage: 26.0,
            attack_skill: 30,
            armor: 9.0,
            experience_yield: 120,
            attack_interval: 1.8,
            loot: &[
                LootEntry { item: "gold coin", chance: 0.9, min_count: 10, max_count: 40 },
                LootEntry { item: "troll hide", chance: 0.4, min_count: 1, max_count: 2 },
                LootEntry { item: "heavy club", chance: 0.2, min_count: 1, max_count: 1 },
            ],
        },
    }
}

/// Default body footprint used for player and monsters
fn body_collider() -> Collider {
    Collider { w: 20.0, h: 20.0, offset_x: 6.0, offset_y: 10.0 }
}

/// Materialize every descriptor from a generated level
pub fn spawn_all(
    store: &mut Store,
    grid: &mut Grid,
    spawns: &[SpawnDescriptor],
    now: f64,
) -> Vec<EntityId> {
    spawns
        .iter()
        .map(|s| match s.kind {
            SpawnKind::Monster(kind) => spawn_monster(store, grid, kind, s.x, s.y, now),
            SpawnKind::Exit => spawn_exit(store, s.x, s.y),
        })
        .collect()
}

pub fn spawn_monster(
    store: &mut Store,
    grid: &mut Grid,
    kind: MonsterKind,
    x: f32,
    y: f32,
    now: f64,
) -> EntityId {
    let stats = monster_stats(kind);
    let id = store.create_entity();

    store.add_component(id, Component::Position(Position::new(x, y)));
    store.add_component(id, Component::Velocity(Velocity::default()));
    store.add_component(id, Component::Facing(Facing::default()));
    store.add_component(id, Component::Health(Health::full(stats.health)));
    store.add_component(id, Component::Collider(body_collider()));
    store.add_component(
        id,
        Component::Ai(Ai {
            speed: stats.speed,
            wander_target: Position::new(x, y).as_vec2(),
            wander_deadline: now,
        }),
    );
    store.add_component(
        id,
        Component::Cooldown(Cooldown { last_attack: now, interval: stats.attack_interval }),
    );
    store.add_component(
        id,
        Component::Weapon(Weapon {
            name: format!("{} attack", stats.name),
            base_damage: stats.base_damage,
            attack_skill: stats.attack_skill,
        }),
    );
    store.add_component(
        id,
        Component::Defense(Defense { armor: stats.armor, shield_skill: 0 }),
    );
    store.add_component(
        id,
        Component::Monster(Monster { kind, experience_yield: stats.experience_yield }),
    );

    commit_initial_occupancy(store, grid, id);
    id
}

pub fn spawn_player(
    store: &mut Store,
    grid: &mut Grid,
    vocation: Vocation,
    x: f32,
    y: f32,
    config: &SimulationConfig,
    now: f64,
) -> EntityId {
    let id = store.create_entity();

    store.add_component(id, Component::Position(Position::new(x, y)));
    store.add_component(id, Component::Velocity(Velocity::default()));
    store.add_component(id, Component::Facing(Facing::default()));
    store.add_component(id, Component::Health(Health::full(150.0)));
    store.add_component(id, Component::Mana(Mana::full(50.0)));
    store.add_component(id, Component::Experience(Experience { points: 0, level: 1 }));
    store.add_component(id, Component::Collider(body_collider()));
    store.add_component(
        id,
        Component::Cooldown(Cooldown {
            last_attack: now,
            interval: config.base_attack_cooldown,
        }),
    );
    store.add_component(
        id,
        Component::Weapon(Weapon {
            name: "short sword".into(),
            base_damage: 14.0,
            attack_skill: 10,
        }),
    );
    store.add_component(id, Component::Defense(Defense { armor: 2.0, shield_skill: 5 }));
    store.add_component(id, Component::Inventory(Inventory::default()));
    store.add_component(id, Component::Regen(Regen { next_at: now + config.regen_interval as f64 }));
    store.add_component(id, Component::Player(Player { vocation }));

    commit_initial_occupancy(store, grid, id);
    id
}

fn spawn_exit(store: &mut Store, x: f32, y: f32) -> EntityId {
    let id = store.create_entity();
    store.add_component(id, Component::Position(Position::new(x, y)));
    store.add_component(id, Component::ExitMarker(ExitMarker));
    id
}

/// Seed the occupancy back-reference for a freshly placed body through
/// the grid's single commit path
fn commit_initial_occupancy(store: &Store, grid: &mut Grid, id: EntityId) {
    let Some(&pos) = store.position(id) else { return };
    let Some(&col) = store.collider(id) else { return };
    let center_x = pos.x + col.offset_x + col.w / 2.0;
    let center_y = pos.y + col.offset_y + col.h / 2.0;
    let cell = grid.world_to_cell(center_x, center_y);
    grid.commit_occupancy(id, None, Some(cell));
}
