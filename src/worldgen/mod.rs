//! Deterministic procedural world generation
//!
//! Pure functions from (width, height, seed, kind) to a tile grid plus
//! spawn descriptors. Two calls with the same inputs produce identical
//! grids and identical spawn sequences; the only randomness is a freshly
//! constructed [`rng::Lcg`].

pub mod dungeon;
pub mod overworld;
pub mod rng;

use serde::{Deserialize, Serialize};

use crate::ecs::components::MonsterKind;
use crate::grid::Grid;

/// World units per tile used by the generators
pub const TILE_SIZE: f32 = 32.0;

/// Which layout a generator should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapKind {
    Overworld,
    Dungeon,
    Cave,
}

/// What a spawn descriptor materializes into
///
/// Descriptors are plain records; a separate entity factory turns them
/// into store entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnKind {
    Monster(MonsterKind),
    Exit,
}

/// A spawn request emitted by a generator, in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnDescriptor {
    pub kind: SpawnKind,
    pub x: f32,
    pub y: f32,
}

impl SpawnDescriptor {
    /// Descriptor centered in the given cell
    pub(crate) fn at_cell(kind: SpawnKind, cx: i32, cy: i32) -> Self {
        Self {
            kind,
            x: (cx as f32 + 0.5) * TILE_SIZE,
            y: (cy as f32 + 0.5) * TILE_SIZE,
        }
    }
}

/// A generated level: the grid plus the entities to materialize on it
#[derive(Debug)]
pub struct Generated {
    pub grid: Grid,
    pub spawns: Vec<SpawnDescriptor>,
}

/// Generate a level
///
/// Pure: no I/O, no shared state, byte-identical output for identical
/// inputs.
pub fn generate(width: usize, height: usize, seed: u64, kind: MapKind) -> Generated {
    match kind {
        MapKind::Overworld => overworld::generate(width, height, seed),
        MapKind::Dungeon => dungeon::generate(width, height, seed, dungeon::Layout::Rooms),
        MapKind::Cave => dungeon::generate(width, height, seed, dungeon::Layout::Cave),
    }
}
