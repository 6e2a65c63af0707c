//! Integration tests for world generation
//!
//! These tests verify the generator contracts end to end:
//! - Determinism: identical (width, height, seed) inputs produce
//!   identical grids and spawn sequences
//! - Overworld structure: border ring, town square, temple, gates
//! - Enemy placement constraints: off-town, off-solid, bounded count
//! - Dungeon layouts: rectangular room classification and cave caverns

use mistvale::grid::TileItem;
use mistvale::worldgen::{generate, MapKind, SpawnKind};

use proptest::prelude::*;

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_overworld_identical_for_identical_inputs() {
    let a = generate(96, 96, 20771, MapKind::Overworld);
    let b = generate(96, 96, 20771, MapKind::Overworld);

    assert_eq!(a.spawns, b.spawns);
    assert_eq!(a.grid.tiles().len(), b.grid.tiles().len());
    for (ta, tb) in a.grid.tiles().iter().zip(b.grid.tiles()) {
        assert_eq!(ta.items(), tb.items());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let a = generate(96, 96, 1, MapKind::Overworld);
    let b = generate(96, 96, 2, MapKind::Overworld);

    let differs = a
        .grid
        .tiles()
        .iter()
        .zip(b.grid.tiles())
        .any(|(ta, tb)| ta.items() != tb.items());
    assert!(differs, "two seeds should not paint the same map");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_cave_generation_is_deterministic(seed in 0u64..100_000) {
        let a = generate(48, 48, seed, MapKind::Cave);
        let b = generate(48, 48, seed, MapKind::Cave);
        prop_assert_eq!(a.spawns, b.spawns);
        for (ta, tb) in a.grid.tiles().iter().zip(b.grid.tiles()) {
            prop_assert_eq!(ta.items(), tb.items());
        }
    }

    #[test]
    fn prop_border_is_always_solid(seed in 0u64..100_000) {
        let generated = generate(40, 32, seed, MapKind::Overworld);
        let grid = &generated.grid;
        for x in 0..40 {
            prop_assert!(grid.is_solid_at(x, 0));
            prop_assert!(grid.is_solid_at(x, 31));
        }
        for y in 0..32 {
            prop_assert!(grid.is_solid_at(0, y));
            prop_assert!(grid.is_solid_at(39, y));
        }
    }
}

// ============================================================================
// Overworld structure
// ============================================================================

/// The town is a walled square around the map center with a walkable
/// floor interior, a temple at its heart, and six open gate cells.
#[test]
fn test_overworld_town_layout() {
    let generated = generate(96, 96, 4242, MapKind::Overworld);
    let grid = &generated.grid;
    let (cx, cy) = (48, 48);

    // Temple centerpiece: altar with the chest beside it
    assert!(grid.get_tile(cx, cy).unwrap().has_item(TileItem::Altar));
    assert!(grid.get_tile(cx + 1, cy).unwrap().has_item(TileItem::Chest));

    // Temple gap on the south border is passable
    assert!(!grid.get_tile(cx, cy + 3).unwrap().is_solid());

    // Town wall ring is solid away from the gates
    assert!(grid.get_tile(cx + 8, cy + 8).unwrap().is_solid());

    // All six gates are open
    let gates = [
        (cx - 1, cy - 8),
        (cx, cy - 8),
        (cx - 1, cy + 8),
        (cx, cy + 8),
        (cx - 8, cy - 1),
        (cx - 8, cy),
    ];
    for (x, y) in gates {
        assert!(!grid.get_tile(x, y).unwrap().is_solid(), "gate ({x},{y}) blocked");
    }

    // Town interior floor between wall and temple
    let tile = grid.get_tile(cx + 5, cy + 5).unwrap();
    assert_eq!(tile.items(), &[TileItem::Floor]);
}

/// On a map so small that every cell sits inside the town keep-out
/// band, every enemy exhausts its attempt budget; generation still
/// terminates and simply delivers no spawns.
#[test]
fn test_enemy_placement_terminates_when_no_cell_qualifies() {
    let generated = generate(20, 20, 31337, MapKind::Overworld);

    // Max Chebyshev distance from the center of a 20x20 map is 10,
    // short of the 12-cell keep-out, so no candidate ever qualifies
    assert!(generated.spawns.is_empty());
}

#[test]
fn test_overworld_enemy_spawns_satisfy_constraints() {
    let generated = generate(96, 96, 77, MapKind::Overworld);
    let (cx, cy) = (48i32, 48i32);

    assert!(!generated.spawns.is_empty());
    assert!(generated.spawns.len() <= 60);

    for spawn in &generated.spawns {
        assert!(matches!(spawn.kind, SpawnKind::Monster(_)));
        let (x, y) = generated.grid.world_to_cell(spawn.x, spawn.y);
        // Outside the town keep-out band
        assert!((x - cx).abs().max((y - cy).abs()) > 12);
        // Never on a solid tile
        assert!(!generated.grid.get_tile(x, y).unwrap().is_solid());
    }
}

// ============================================================================
// Dungeon layouts
// ============================================================================

/// A rooms dungeon is a single rectangular chamber: every border cell is
/// wall, every interior cell is bare floor (plus possibly the exit).
#[test]
fn test_rooms_dungeon_classification() {
    let generated = generate(64, 64, 1337, MapKind::Dungeon);
    let grid = &generated.grid;

    for y in 0..64i32 {
        for x in 0..64i32 {
            let tile = grid.get_tile(x, y).unwrap();
            let border = x == 0 || x == 63 || y == 0 || y == 63;
            if border {
                assert!(tile.has_item(TileItem::Wall), "({x},{y}) should be wall");
            } else {
                assert!(tile.has_item(TileItem::Floor), "({x},{y}) should be floor");
                assert!(!tile.has_item(TileItem::Wall));
            }
        }
    }
}

#[test]
fn test_rooms_dungeon_places_a_central_exit() {
    let generated = generate(64, 64, 555, MapKind::Dungeon);

    let exits: Vec<_> = generated
        .spawns
        .iter()
        .filter(|s| s.kind == SpawnKind::Exit)
        .collect();
    assert_eq!(exits.len(), 1);

    let (x, y) = generated.grid.world_to_cell(exits[0].x, exits[0].y);
    assert!((x - 32).abs() <= 5);
    assert!((y - 32).abs() <= 5);
    assert!(generated.grid.get_tile(x, y).unwrap().has_item(TileItem::Exit));
}

#[test]
fn test_cave_walls_enclose_open_space() {
    let generated = generate(48, 48, 99, MapKind::Cave);
    let grid = &generated.grid;

    // Border sealed
    for x in 0..48 {
        assert!(grid.is_solid_at(x, 0));
        assert!(grid.is_solid_at(x, 47));
    }

    // The automaton always leaves some open floor on a map this size
    let open = grid.tiles().iter().filter(|t| !t.is_solid()).count();
    assert!(open > 0, "cave should not be completely solid");
}
