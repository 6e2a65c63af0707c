//! Overworld generation: terrain, town, temple, gates, enemy placement
//!
//! The layout is carved in fixed passes over a freshly seeded LCG, so a
//! given (width, height, seed) always yields the same map. Enemy
//! placement uses rejection sampling with a hard attempt budget; an
//! enemy whose budget runs out is skipped silently, which means the map
//! may legitimately under-deliver on the nominal count.

use crate::ecs::components::MonsterKind;
use crate::grid::{Grid, TileItem};
use crate::worldgen::rng::Lcg;
use crate::worldgen::{Generated, SpawnDescriptor, SpawnKind, TILE_SIZE};

/// Half-width of the square town carved around the map center, in cells
const TOWN_RADIUS: i32 = 8;
/// Half-width of the concentric temple square
const TEMPLE_RADIUS: i32 = 3;
/// No obstacles spawn within this Chebyshev distance of the center
const OBSTACLE_CLEAR_RADIUS: i32 = TOWN_RADIUS + 2;
/// Enemies must land farther than TOWN_RADIUS + this from the center
const ENEMY_TOWN_BUFFER: i32 = 4;
/// Nominal enemy count; rejection sampling may deliver fewer
const ENEMY_COUNT: usize = 60;
/// Attempt budget per enemy before it is skipped
const ENEMY_PLACEMENT_ATTEMPTS: usize = 50;

const FLOWERS_CHANCE: f64 = 0.05;
const DIRT_CHANCE: f64 = 0.05;
const OBSTACLE_CHANCE: f64 = 0.04;
/// Tree vs rock split for obstacles
const TREE_SHARE: f64 = 0.6;

pub fn generate(width: usize, height: usize, seed: u64) -> Generated {
    let mut rng = Lcg::new(seed);
    let mut grid = Grid::new(width, height, TILE_SIZE);
    let mut spawns = Vec::new();

    let cx = width as i32 / 2;
    let cy = height as i32 / 2;

    paint_terrain(&mut grid, &mut rng, cx, cy);
    carve_town(&mut grid, cx, cy);
    carve_temple(&mut grid, cx, cy);
    open_town_gates(&mut grid, cx, cy);
    place_enemies(&grid, &mut rng, cx, cy, &mut spawns);
    place_scenery(&mut grid);

    tracing::debug!(
        width,
        height,
        seed,
        enemies = spawns.len(),
        "overworld generated"
    );

    Generated { grid, spawns }
}

/// Pass 1: border ring plus weighted interior ground draws
fn paint_terrain(grid: &mut Grid, rng: &mut Lcg, cx: i32, cy: i32) {
    let (w, h) = (grid.width as i32, grid.height as i32);

    for y in 0..h {
        for x in 0..w {
            if x == 0 || x == w - 1 || y == 0 || y == h - 1 {
                grid.push_item(x, y, TileItem::Wall);
                continue;
            }

            let ground_roll = rng.next();
            let ground = if ground_roll < FLOWERS_CHANCE {
                TileItem::Flowers
            } else if ground_roll < FLOWERS_CHANCE + DIRT_CHANCE {
                TileItem::Dirt
            } else {
                TileItem::Grass
            };
            grid.push_item(x, y, ground);

            let center_dist = (x - cx).abs().max((y - cy).abs());
            if center_dist > OBSTACLE_CLEAR_RADIUS && rng.next() < OBSTACLE_CHANCE {
                let obstacle = if rng.next() < TREE_SHARE {
                    TileItem::Tree
                } else {
                    TileItem::Rock
                };
                grid.push_item(x, y, obstacle);
            }
        }
    }
}

/// Pass 2: town square; border walled, interior forced to a single floor
fn carve_town(grid: &mut Grid, cx: i32, cy: i32) {
    for y in (cy - TOWN_RADIUS)..=(cy + TOWN_RADIUS) {
        for x in (cx - TOWN_RADIUS)..=(cx + TOWN_RADIUS) {
            let dist = (x - cx).abs().max((y - cy).abs());
            grid.clear_items(x, y);
            if dist == TOWN_RADIUS {
                grid.push_item(x, y, TileItem::Wall);
            } else {
                grid.push_item(x, y, TileItem::Floor);
            }
        }
    }
}

/// Pass 3: temple square with stone floor, walled border with one gap,
/// and the altar/chest pair at its center
fn carve_temple(grid: &mut Grid, cx: i32, cy: i32) {
    // South-middle border cell is the deliberate gap
    let gap = (cx, cy + TEMPLE_RADIUS);

    for y in (cy - TEMPLE_RADIUS)..=(cy + TEMPLE_RADIUS) {
        for x in (cx - TEMPLE_RADIUS)..=(cx + TEMPLE_RADIUS) {
            let dist = (x - cx).abs().max((y - cy).abs());
            grid.clear_items(x, y);
            grid.push_item(x, y, TileItem::StoneFloor);
            if dist == TEMPLE_RADIUS && (x, y) != gap {
                grid.push_item(x, y, TileItem::StoneWall);
            }
        }
    }

    grid.push_item(cx, cy, TileItem::Altar);
    grid.push_item(cx + 1, cy, TileItem::Chest);
}

/// Pass 4: six gate cells, two per side on three of the four town edges
fn open_town_gates(grid: &mut Grid, cx: i32, cy: i32) {
    let gates = [
        (cx - 1, cy - TOWN_RADIUS),
        (cx, cy - TOWN_RADIUS),
        (cx - 1, cy + TOWN_RADIUS),
        (cx, cy + TOWN_RADIUS),
        (cx - TOWN_RADIUS, cy - 1),
        (cx - TOWN_RADIUS, cy),
    ];
    for (x, y) in gates {
        grid.open_gate(x, y);
    }
}

/// Pass 5: enemy spawn descriptors by rejection sampling
fn place_enemies(
    grid: &Grid,
    rng: &mut Lcg,
    cx: i32,
    cy: i32,
    spawns: &mut Vec<SpawnDescriptor>,
) {
    let keep_out = TOWN_RADIUS + ENEMY_TOWN_BUFFER;
    let mut skipped = 0usize;

    'enemies: for _ in 0..ENEMY_COUNT {
        for _ in 0..ENEMY_PLACEMENT_ATTEMPTS {
            let x = rng.next_int(grid.width as u32) as i32;
            let y = rng.next_int(grid.height as u32) as i32;

            let center_dist = (x - cx).abs().max((y - cy).abs());
            let blocked = grid
                .get_tile(x, y)
                .map(|t| t.is_solid())
                .unwrap_or(true);

            if !blocked && center_dist > keep_out {
                let kind = roll_monster_kind(rng);
                spawns.push(SpawnDescriptor::at_cell(SpawnKind::Monster(kind), x, y));
                continue 'enemies;
            }
        }
        // Budget exhausted for this enemy; skip it silently
        skipped += 1;
    }

    if skipped > 0 {
        tracing::warn!(skipped, "enemy placement under-delivered");
    }
}

/// Second weighted roll: which monster an accepted cell receives
fn roll_monster_kind(rng: &mut Lcg) -> MonsterKind {
    let roll = rng.next();
    if roll < 0.30 {
        MonsterKind::Rat
    } else if roll < 0.55 {
        MonsterKind::Snake
    } else if roll < 0.75 {
        MonsterKind::Wolf
    } else if roll < 0.90 {
        MonsterKind::Skeleton
    } else if roll < 0.97 {
        MonsterKind::Orc
    } else {
        MonsterKind::Troll
    }
}

/// Pass 6: fixed scenery at literal coordinates near the northwest corner
fn place_scenery(grid: &mut Grid) {
    grid.push_item(3, 3, TileItem::Rock);
    grid.push_item(4, 3, TileItem::Tree);
    grid.push_item(3, 4, TileItem::Flowers);
}
