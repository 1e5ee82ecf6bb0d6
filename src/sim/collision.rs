//! Collision queries
//!
//! Every motion routine steps one pixel at a time and asks these before
//! committing the step, so exactly-touching edges must not count as a hit.

use glam::IVec2;

use super::geometry::{IRect, grid_index_of, solid_rect, tile_rect};
use super::state::Solid;
use super::world::WorldGrid;
use crate::consts::{TILE_WINDOW_HALF_X, TILE_WINDOW_HALF_Y};

/// Strict overlap test; shared edges do not collide
#[inline]
pub fn rect_collision(a: IRect, b: IRect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

/// Test `rect` against visible tiles in the 3x5 window around `anchor`'s grid cell
pub fn collides_with_tiles(world: &WorldGrid, rect: IRect, anchor: IVec2) -> bool {
    let center = grid_index_of(anchor);
    let half = IVec2::new(TILE_WINDOW_HALF_X, TILE_WINDOW_HALF_Y);
    world
        .visible_in(center - half, center + half)
        .any(|(x, y)| rect_collision(rect, tile_rect(x, y)))
}

pub fn collides_with_solids(solids: &[Solid], rect: IRect) -> bool {
    solids
        .iter()
        .any(|solid| rect_collision(rect, solid_rect(solid)))
}
