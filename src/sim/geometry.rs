//! Grid and rectangle helpers
//!
//! World positions are integer pixels. The tile grid is spaced `TILESIZE`
//! apart, but each tile only collides over an 8x8 footprint at its origin.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::Solid;
use crate::assets::get_sprite;
use crate::consts::*;

/// Axis-aligned integer rectangle with a top-left origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl IRect {
    pub const fn new(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    /// Grow by `amount` on every side
    pub fn inflate(self, amount: i32) -> Self {
        Self {
            pos: self.pos - IVec2::splat(amount),
            size: self.size + IVec2::splat(2 * amount),
        }
    }

    pub fn translated(self, offset: IVec2) -> Self {
        Self {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }
}

/// Grid cell containing a world position
///
/// Rounds half away from zero. The sign branch keeps integer division from
/// truncating negative positions toward the origin cell.
pub fn grid_index_of(world_pos: IVec2) -> IVec2 {
    IVec2::new(grid_axis(world_pos.x), grid_axis(world_pos.y))
}

#[inline]
fn grid_axis(v: i32) -> i32 {
    if v > 0 {
        (v + TILESIZE / 2) / TILESIZE
    } else {
        (v - TILESIZE / 2) / TILESIZE
    }
}

/// World position of a grid cell
pub fn tile_position(x: i32, y: i32) -> IVec2 {
    IVec2::new(x * TILESIZE, y * TILESIZE)
}

/// Player collision box, centre-bottom anchored on `pos`
pub fn player_hitbox(pos: IVec2) -> IRect {
    IRect::new(pos - PLAYER_HITBOX_OFFSET, PLAYER_HITBOX_SIZE)
}

pub fn tile_rect(x: i32, y: i32) -> IRect {
    IRect::new(tile_position(x, y), IVec2::splat(TILE_COLLISION_SIZE))
}

/// Solid collision box, centred on the solid and sized to its sprite
pub fn solid_rect(solid: &Solid) -> IRect {
    let size = get_sprite(solid.sprite).size;
    IRect::new(solid.pos - size / 2, size)
}
