//! Sprite metadata table
//!
//! Pure lookup from a sprite id to its atlas rectangle and frame count.
//! Collision sizes for solids are derived from these dimensions.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Every sprite the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpriteId {
    #[default]
    White,
    Dice,
    Celeste,
    CelesteRun,
    CelesteAttack,
    Solid01,
    Solid02,
    ButtonPlay,
    ButtonSave,
    TileGrass01,
    BasicProjectile,
}

/// Atlas placement of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub atlas_offset: IVec2,
    pub size: IVec2,
    pub frame_count: u32,
}

pub fn get_sprite(id: SpriteId) -> Sprite {
    let (atlas_offset, size, frame_count) = match id {
        SpriteId::White => ((0, 0), (1, 1), 1),
        SpriteId::Dice => ((16, 0), (16, 16), 1),
        SpriteId::Celeste => ((112, 0), (17, 20), 1),
        SpriteId::CelesteRun => ((128, 0), (17, 20), 12),
        SpriteId::CelesteAttack => ((229, 0), (17, 20), 1),
        SpriteId::Solid01 => ((0, 16), (28, 18), 1),
        SpriteId::Solid02 => ((32, 16), (16, 13), 1),
        SpriteId::ButtonPlay => ((80, 0), (32, 16), 1),
        SpriteId::ButtonSave => ((80, 16), (32, 16), 1),
        SpriteId::TileGrass01 => ((112, 32), (95, 95), 1),
        // Lives in the "projectiles" atlas
        SpriteId::BasicProjectile => ((35, 35), (10, 10), 1),
    };

    Sprite {
        atlas_offset: IVec2::new(atlas_offset.0, atlas_offset.1),
        size: IVec2::new(size.0, size.1),
        frame_count,
    }
}
