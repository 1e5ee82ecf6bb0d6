//! World tile grid
//!
//! A dense `WORLD_GRID.x * WORLD_GRID.y` array allocated once. Only the
//! level editor flips tiles; the simulation reads them every tick.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::grid_index_of;
use crate::consts::WORLD_GRID;

/// One grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Autotiling neighbour bits (stored, not used by collision)
    pub neighbour_mask: i32,
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Default for WorldGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldGrid {
    /// All tiles start invisible
    pub fn new() -> Self {
        Self::with_size(WORLD_GRID.x, WORLD_GRID.y)
    }

    pub fn with_size(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
        }
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((x * self.height + y) as usize)
        } else {
            None
        }
    }

    /// `None` outside the grid
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(|i| &mut self.tiles[i])
    }

    /// Tile under a world position
    pub fn tile_at_world(&self, world_pos: IVec2) -> Option<&Tile> {
        let grid = grid_index_of(world_pos);
        self.tile_at(grid.x, grid.y)
    }

    /// Returns false if `(x, y)` is outside the grid
    pub fn set_visible(&mut self, x: i32, y: i32, visible: bool) -> bool {
        match self.tile_at_mut(x, y) {
            Some(tile) => {
                tile.is_visible = visible;
                true
            }
            None => false,
        }
    }

    /// Visible tiles in the window `[min, max]` (inclusive), with their grid coordinates
    pub fn visible_in(&self, min: IVec2, max: IVec2) -> impl Iterator<Item = (i32, i32)> + '_ {
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y).filter_map(move |y| {
                self.tile_at(x, y)
                    .filter(|tile| tile.is_visible)
                    .map(|_| (x, y))
            })
        })
    }
}
