//! Dungeon and cave generation
//!
//! The rooms layout is a plain rectangular chamber. The cave layout runs
//! a cellular automaton over seeded noise: exactly four generations of a
//! majority rule smooth the noise into organic cavern shapes, then floor
//! is painted everywhere with walls overlaid where the automaton (or the
//! outer border) says wall.

use crate::grid::{Grid, TileItem};
use crate::worldgen::rng::Lcg;
use crate::worldgen::{Generated, SpawnDescriptor, SpawnKind, TILE_SIZE};

/// Initial wall probability for cave noise seeding
const CAVE_SEED_WALL_CHANCE: f64 = 0.45;
/// Fixed number of automaton generations; termination never depends on data
const CAVE_GENERATIONS: usize = 4;
/// A wall cell stays wall with at least this many wall neighbors
const WALL_SURVIVE_NEIGHBORS: usize = 4;
/// A floor cell becomes wall with at least this many wall neighbors
const WALL_BIRTH_NEIGHBORS: usize = 5;
/// Rock decoration chance on remaining cave floor
const ROCK_SPRINKLE_CHANCE: f64 = 0.02;
/// Exit placement: center offset range is +/- this many cells per axis
const EXIT_CENTER_SPREAD: i32 = 5;
/// Exit placement attempt budget
const EXIT_PLACEMENT_ATTEMPTS: usize = 100;

/// Underground layout family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Single rectangular chamber: interior floor, border wall
    Rooms,
    /// Cellular-automaton cavern
    Cave,
}

pub fn generate(width: usize, height: usize, seed: u64, layout: Layout) -> Generated {
    let mut rng = Lcg::new(seed);
    let mut grid = Grid::new(width, height, TILE_SIZE);
    let mut spawns = Vec::new();

    match layout {
        Layout::Rooms => carve_room(&mut grid),
        Layout::Cave => carve_cave(&mut grid, &mut rng),
    }

    place_exit(&mut grid, &mut rng, &mut spawns);

    tracing::debug!(width, height, seed, ?layout, "dungeon level generated");

    Generated { grid, spawns }
}

fn carve_room(grid: &mut Grid) {
    let (w, h) = (grid.width as i32, grid.height as i32);
    for y in 0..h {
        for x in 0..w {
            if x == 0 || x == w - 1 || y == 0 || y == h - 1 {
                grid.push_item(x, y, TileItem::Wall);
            } else {
                grid.push_item(x, y, TileItem::Floor);
            }
        }
    }
}

fn carve_cave(grid: &mut Grid, rng: &mut Lcg) {
    let (w, h) = (grid.width, grid.height);

    // Interior noise; border cells and out-of-bounds count as wall
    let mut walls = vec![true; w * h];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            walls[y * w + x] = rng.next() < CAVE_SEED_WALL_CHANCE;
        }
    }

    for _ in 0..CAVE_GENERATIONS {
        walls = step_automaton(&walls, w, h);
    }

    for y in 0..h as i32 {
        for x in 0..w as i32 {
            grid.push_item(x, y, TileItem::Floor);
            let border =
                x == 0 || x == w as i32 - 1 || y == 0 || y == h as i32 - 1;
            if border || walls[y as usize * w + x as usize] {
                grid.push_item(x, y, TileItem::Wall);
            } else if rng.next() < ROCK_SPRINKLE_CHANCE {
                grid.push_item(x, y, TileItem::Rock);
            }
        }
    }
}

/// One automaton generation over the interior; the border stays wall
fn step_automaton(walls: &[bool], w: usize, h: usize) -> Vec<bool> {
    let mut next = walls.to_vec();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let neighbors = wall_neighbors(walls, w, h, x as i32, y as i32);
            next[y * w + x] = if walls[y * w + x] {
                neighbors >= WALL_SURVIVE_NEIGHBORS
            } else {
                neighbors >= WALL_BIRTH_NEIGHBORS
            };
        }
    }
    next
}

/// Count wall cells among the 8 neighbors, out-of-bounds treated as wall
fn wall_neighbors(walls: &[bool], w: usize, h: usize, x: i32, y: i32) -> usize {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                count += 1;
            } else if walls[ny as usize * w + nx as usize] {
                count += 1;
            }
        }
    }
    count
}

/// Rejection-sample an exit cell near the map center
///
/// Accepts the first non-solid cell within +/- EXIT_CENTER_SPREAD of the
/// center; if the attempt budget runs out (a cramped cave can deny every
/// candidate), the level simply has no exit and collaborators see the
/// symptom, not an error.
fn place_exit(grid: &mut Grid, rng: &mut Lcg, spawns: &mut Vec<SpawnDescriptor>) {
    let cx = grid.width as i32 / 2;
    let cy = grid.height as i32 / 2;
    let spread = (EXIT_CENTER_SPREAD * 2 + 1) as u32;

    for _ in 0..EXIT_PLACEMENT_ATTEMPTS {
        let x = cx + rng.next_int(spread) as i32 - EXIT_CENTER_SPREAD;
        let y = cy + rng.next_int(spread) as i32 - EXIT_CENTER_SPREAD;

        let open = grid.get_tile(x, y).map(|t| !t.is_solid()).unwrap_or(false);
        if open {
            grid.push_item(x, y, TileItem::Exit);
            spawns.push(SpawnDescriptor::at_cell(SpawnKind::Exit, x, y));
            return;
        }
    }

    tracing::warn!("exit placement exhausted its attempt budget; level has no exit");
}
