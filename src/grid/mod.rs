//! Tile grid with stacked items and an occupancy back-reference
//!
//! Each tile is a bottom-to-top stack of item records (ground layer
//! first, decorations after) plus a cached back-reference to the entity
//! whose footprint center currently lies in the cell. The back-reference
//! is a lookup relation, not ownership: the store owns the entity, the
//! tile only caches where it is for O(1) adjacency queries.
//!
//! The only authorized mutation path for occupancy is
//! [`Grid::commit_occupancy`]; no other code writes the field, which is
//! what keeps the cache consistent with `Position`.

use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;

/// An item in a tile's stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileItem {
    Grass,
    Dirt,
    Flowers,
    Water,
    Floor,
    StoneFloor,
    Wall,
    StoneWall,
    Tree,
    Rock,
    Altar,
    Chest,
    Exit,
}

impl TileItem {
    /// The fixed set of item ids that block movement
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            TileItem::Wall
                | TileItem::StoneWall
                | TileItem::Tree
                | TileItem::Rock
                | TileItem::Altar
                | TileItem::Chest
        )
    }

    /// Wall-family items, removable when opening a gate
    pub fn is_wall(&self) -> bool {
        matches!(self, TileItem::Wall | TileItem::StoneWall)
    }
}

/// One grid cell: an item stack plus the occupancy back-reference
#[derive(Debug, Clone, Default)]
pub struct Tile {
    items: Vec<TileItem>,
    occupant: Option<EntityId>,
}

impl Tile {
    /// Items bottom-to-top
    pub fn items(&self) -> &[TileItem] {
        &self.items
    }

    pub fn top(&self) -> Option<TileItem> {
        self.items.last().copied()
    }

    pub fn has_item(&self, item: TileItem) -> bool {
        self.items.contains(&item)
    }

    /// True if any item in the stack blocks movement
    pub fn is_solid(&self) -> bool {
        self.items.iter().any(|i| i.is_solid())
    }

    /// Cached occupant id
    ///
    /// May be stale if the entity was destroyed outside a movement
    /// commit; callers that need a live entity must validate against the
    /// store and treat a stale reference as absent.
    pub fn occupant(&self) -> Option<EntityId> {
        self.occupant
    }
}

/// Fixed-size row-major grid of tiles
///
/// Shape is immutable after generation; per-tile contents stay mutable
/// during play (digging, pickups).
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![Tile::default(); width * height],
        }
    }

    /// Bounds-checked tile lookup; negative or out-of-range is absent
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            Some(&self.tiles[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            Some(&mut self.tiles[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// Flat row-major view of all tiles, length width * height
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Cell under a world position: floor(position / tile_size)
    pub fn world_to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.tile_size).floor() as i32,
            (y / self.tile_size).floor() as i32,
        )
    }

    /// Collision query: out-of-bounds coordinates report solid, so
    /// entities can never escape past the grid edge
    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map(|t| t.is_solid()).unwrap_or(true)
    }

    pub fn push_item(&mut self, x: i32, y: i32, item: TileItem) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.items.push(item);
        }
    }

    pub fn pop_item(&mut self, x: i32, y: i32) -> Option<TileItem> {
        self.get_tile_mut(x, y)?.items.pop()
    }

    /// Replace the whole stack with nothing (generators overwrite stacks
    /// when carving the town and temple)
    pub fn clear_items(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.items.clear();
        }
    }

    /// Remove every wall-family item from the stack, then guarantee at
    /// least one floor item remains ("open gate")
    pub fn open_gate(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.items.retain(|i| !i.is_wall());
            if tile.items.is_empty() {
                tile.items.push(TileItem::Floor);
            }
        }
    }

    /// The single authorized occupancy mutation
    ///
    /// Clears the old cell only if it still names `id` (a later mover may
    /// already have claimed it), then records `id` at the new cell.
    /// `new_cell: None` releases occupancy entirely (entity destroyed).
    /// Out-of-bounds cells are ignored.
    pub fn commit_occupancy(
        &mut self,
        id: EntityId,
        old_cell: Option<(i32, i32)>,
        new_cell: Option<(i32, i32)>,
    ) {
        if let Some((ox, oy)) = old_cell {
            if let Some(tile) = self.get_tile_mut(ox, oy) {
                if tile.occupant == Some(id) {
                    tile.occupant = None;
                }
            }
        }
        if let Some((nx, ny)) = new_cell {
            if let Some(tile) = self.get_tile_mut(nx, ny) {
                tile.occupant = Some(id);
            }
        }
    }
}
