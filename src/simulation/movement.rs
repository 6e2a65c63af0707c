//! Movement and collision resolution
//!
//! Per frame, every entity with Position and Velocity is resolved with
//! axis-separated sliding: the X displacement is tested and committed
//! first, then the Y displacement is evaluated from the post-X position.
//! Diagonal motion against a wall therefore slides along the free axis
//! with no diagonal-specific logic. This order is a contract, not an
//! implementation detail.
//!
//! Entity-vs-entity blocking tests each mover against the other's
//! committed position at resolution time, not a predicted one; at high
//! speed and low frame rate two movers can pass through each other.
//! Accepted simplification (continuous collision is out of scope).

use crate::core::config::SimulationConfig;
use crate::core::types::{Direction, EntityId};
use crate::ecs::components::{Collider, ComponentKind, Position, Velocity};
use crate::ecs::Store;
use crate::grid::{Grid, TileItem};

/// Axis-aligned footprint box in world units
#[derive(Debug, Clone, Copy)]
struct Box2 {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Box2 {
    fn from_parts(pos: Position, collider: Option<Collider>) -> Self {
        match collider {
            Some(c) => Self {
                x: pos.x + c.offset_x,
                y: pos.y + c.offset_y,
                w: c.w,
                h: c.h,
            },
            None => Self { x: pos.x, y: pos.y, w: 0.0, h: 0.0 },
        }
    }

    fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    fn overlaps(&self, other: &Box2) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// The sole per-frame entry point the renderer and AI rely on for
/// "where is everything now"
///
/// Mutates Position, Velocity, Facing, and tile occupancy in place.
/// A blocked axis leaves the position unchanged on that axis and zeroes
/// that velocity component for the frame.
pub fn resolve_movement(store: &mut Store, grid: &mut Grid, config: &SimulationConfig, dt: f32) {
    let movers = store.query(&[ComponentKind::Position, ComponentKind::Velocity]);

    for id in movers {
        let Some(&pos) = store.position(id) else { continue };
        let Some(&vel) = store.velocity(id) else { continue };
        let collider = store.collider(id).copied();

        update_facing(store, id, vel);

        if vel.x == 0.0 && vel.y == 0.0 {
            continue;
        }

        let start_box = Box2::from_parts(pos, collider);
        let old_cell = {
            let (cx, cy) = start_box.center();
            grid.world_to_cell(cx, cy)
        };

        // Terrain multiplier is sampled once, under the pre-move center
        let multiplier = terrain_multiplier(grid, old_cell, config);

        let mut new_pos = pos;
        let mut new_vel = vel;

        // X axis, fully resolved first
        let dx = vel.x * multiplier * dt;
        if dx != 0.0 {
            let candidate = Box2::from_parts(
                Position::new(new_pos.x + dx, new_pos.y),
                collider,
            );
            if blocked(store, grid, id, &candidate, Axis::X, dx) {
                new_vel.x = 0.0;
            } else {
                new_pos.x += dx;
            }
        }

        // Y axis, evaluated from the post-X position
        let dy = vel.y * multiplier * dt;
        if dy != 0.0 {
            let candidate = Box2::from_parts(
                Position::new(new_pos.x, new_pos.y + dy),
                collider,
            );
            if blocked(store, grid, id, &candidate, Axis::Y, dy) {
                new_vel.y = 0.0;
            } else {
                new_pos.y += dy;
            }
        }

        if let Some(p) = store.position_mut(id) {
            *p = new_pos;
        }
        if let Some(v) = store.velocity_mut(id) {
            *v = new_vel;
        }

        // Occupancy commit: the single authorized mutation path
        let end_box = Box2::from_parts(new_pos, collider);
        let (ncx, ncy) = end_box.center();
        let new_cell = grid.world_to_cell(ncx, ncy);
        if new_cell != old_cell {
            grid.commit_occupancy(id, Some(old_cell), Some(new_cell));
        }
    }
}

enum Axis {
    X,
    Y,
}

/// Two leading-edge sample points against tile solidity, plus AABB
/// overlap against every other entity holding a Collider
fn blocked(store: &Store, grid: &Grid, mover: EntityId, candidate: &Box2, axis: Axis, delta: f32) -> bool {
    let (p1, p2) = match axis {
        Axis::X => {
            let lead_x = if delta > 0.0 { candidate.x + candidate.w } else { candidate.x };
            (
                (lead_x, candidate.y),
                (lead_x, candidate.y + candidate.h),
            )
        }
        Axis::Y => {
            let lead_y = if delta > 0.0 { candidate.y + candidate.h } else { candidate.y };
            (
                (candidate.x, lead_y),
                (candidate.x + candidate.w, lead_y),
            )
        }
    };

    for (px, py) in [p1, p2] {
        let (cx, cy) = grid.world_to_cell(px, py);
        if grid.is_solid_at(cx, cy) {
            return true;
        }
    }

    for other in store.query(&[ComponentKind::Position, ComponentKind::Collider]) {
        if other == mover {
            continue;
        }
        let Some(&other_pos) = store.position(other) else { continue };
        let Some(&other_col) = store.collider(other) else { continue };
        let other_box = Box2::from_parts(other_pos, Some(other_col));
        if candidate.overlaps(&other_box) {
            return true;
        }
    }

    false
}

/// Facing follows the dominant velocity axis; cosmetic only
fn update_facing(store: &mut Store, id: EntityId, vel: Velocity) {
    if vel.x == 0.0 && vel.y == 0.0 {
        return;
    }
    let direction = if vel.x.abs() >= vel.y.abs() {
        if vel.x >= 0.0 { Direction::Right } else { Direction::Left }
    } else if vel.y >= 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    if let Some(facing) = store.facing_mut(id) {
        facing.direction = direction;
    }
}

fn terrain_multiplier(grid: &Grid, cell: (i32, i32), config: &SimulationConfig) -> f32 {
    let over_water = grid
        .get_tile(cell.0, cell.1)
        .map(|t| t.has_item(TileItem::Water))
        .unwrap_or(false);
    if over_water {
        config.water_speed_multiplier
    } else {
        1.0
    }
}
