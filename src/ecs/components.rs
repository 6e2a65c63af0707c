//! Component data records and the closed kind enumeration
//!
//! Components are plain data with no behavior. Each kind has at most one
//! instance per entity; the `ComponentKind` enum is the storage key, so
//! lookup never goes through runtime type names.

use serde::{Deserialize, Serialize};

use crate::core::types::{Direction, Vec2};

/// Stable identity of a component kind, used as the storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Position,
    Velocity,
    Facing,
    Health,
    Mana,
    Experience,
    Collider,
    Ai,
    Cooldown,
    Weapon,
    Defense,
    Inventory,
    Decay,
    Regen,
    Player,
    Monster,
    Corpse,
    ExitMarker,
}

/// Continuous position in world units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Per-frame velocity in world units per second
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Cosmetic facing, recomputed from velocity sign by the movement resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Facing {
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mana {
    pub current: f32,
    pub max: f32,
}

impl Mana {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }
}

/// Experience points and derived level
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub points: u64,
    pub level: u32,
}

/// Axis-aligned collision box, offset from the position anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub w: f32,
    pub h: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// AI working state: movement speed and the wander timer
///
/// Behavior itself is re-derived from thresholds every tick and never
/// stored here; only the wander target and its re-roll deadline persist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ai {
    pub speed: f32,
    pub wander_target: Vec2,
    /// Clock second at which the wander target is re-rolled
    pub wander_deadline: f64,
}

/// Attack gate: the last attack timestamp lives on the entity, not in
/// any ambient module state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub last_attack: f64,
    pub interval: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub base_damage: f32,
    /// Attack-type skill level feeding the damage formula
    pub attack_skill: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Defense {
    pub armor: f32,
    pub shield_skill: u32,
}

/// Item stacks held by an entity (player bag, corpse contents)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<ItemStack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub name: String,
    pub count: u32,
}

/// Removal timer for short-lived entities (corpses)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decay {
    pub expires_at: f64,
}

/// Passive regeneration timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regen {
    pub next_at: f64,
}

/// Vocation drives the per-level health/mana growth tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vocation {
    Knight,
    Paladin,
    Sorcerer,
    Druid,
}

/// Marker: the player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub vocation: Vocation,
}

/// Monster species identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Rat,
    Snake,
    Wolf,
    Skeleton,
    Orc,
    Troll,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub kind: MonsterKind,
    pub experience_yield: u64,
}

/// Marker: a corpse left behind by a dead entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpse;

/// Marker: the exit cell of a dungeon level
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitMarker;

/// A component instance, tagged with its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Position(Position),
    Velocity(Velocity),
    Facing(Facing),
    Health(Health),
    Mana(Mana),
    Experience(Experience),
    Collider(Collider),
    Ai(Ai),
    Cooldown(Cooldown),
    Weapon(Weapon),
    Defense(Defense),
    Inventory(Inventory),
    Decay(Decay),
    Regen(Regen),
    Player(Player),
    Monster(Monster),
    Corpse(Corpse),
    ExitMarker(ExitMarker),
}

impl Component {
    /// The storage key for this instance
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Velocity(_) => ComponentKind::Velocity,
            Component::Facing(_) => ComponentKind::Facing,
            Component::Health(_) => ComponentKind::Health,
            Component::Mana(_) => ComponentKind::Mana,
            Component::Experience(_) => ComponentKind::Experience,
            Component::Collider(_) => ComponentKind::Collider,
            Component::Ai(_) => ComponentKind::Ai,
            Component::Cooldown(_) => ComponentKind::Cooldown,
            Component::Weapon(_) => ComponentKind::Weapon,
            Component::Defense(_) => ComponentKind::Defense,
            Component::Inventory(_) => ComponentKind::Inventory,
            Component::Decay(_) => ComponentKind::Decay,
            Component::Regen(_) => ComponentKind::Regen,
            Component::Player(_) => ComponentKind::Player,
            Component::Monster(_) => ComponentKind::Monster,
            Component::Corpse(_) => ComponentKind::Corpse,
            Component::ExitMarker(_) => ComponentKind::ExitMarker,
        }
    }
}
