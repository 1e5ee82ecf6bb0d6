//! Fields of Oblivion - simulation core of a small 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, collisions, player and solid motion)
//! - `game`: Fixed-timestep scheduler and the host entry point
//! - `input`, `render`, `sound`, `ui`: Collaborator surfaces the host fills or drains
//! - `assets`: Sprite metadata table
//! - `settings`: Data-driven movement tuning

pub mod assets;
pub mod game;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod sound;
pub mod ui;

pub use game::{FrameReport, update_game};
pub use settings::{MovementTuning, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Simulation ticks per second
    pub const UPDATES_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep (seconds)
    pub const UPDATE_DELAY: f32 = 1.0 / UPDATES_PER_SECOND as f32;
    /// Maximum ticks per host frame; older backlog is dropped
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Virtual resolution shared by every display size
    pub const WORLD_WIDTH: i32 = 640;
    pub const WORLD_HEIGHT: i32 = 360;

    /// Spacing between grid cells in world units
    pub const TILESIZE: i32 = 95;
    /// Collision footprint of a tile (narrower than its spacing)
    pub const TILE_COLLISION_SIZE: i32 = 8;

    /// Background window dimensions
    pub const NUM_OF_TILE_ROWS: i32 = 7;
    pub const NUM_OF_TILE_COLUMNS: i32 = 9;
    /// World grid dimensions (columns, rows)
    pub const WORLD_GRID: IVec2 = IVec2::new(NUM_OF_TILE_COLUMNS, NUM_OF_TILE_ROWS);

    /// Half extents of the local tile window checked around an entity (3 wide, 5 tall)
    pub const TILE_WINDOW_HALF_X: i32 = 1;
    pub const TILE_WINDOW_HALF_Y: i32 = 2;

    /// Player hitbox, anchored 4 left / 8 up from the player position
    pub const PLAYER_HITBOX_OFFSET: IVec2 = IVec2::new(4, 8);
    pub const PLAYER_HITBOX_SIZE: IVec2 = IVec2::new(8, 16);

    /// Fixed capacities
    pub const MAX_SOLIDS_PER_LEVEL: usize = 20;
    pub const MAX_KEYS_PER_ACTION: usize = 3;
    pub const MAX_KEYFRAMES: usize = 2;

    /// Where a crushed player reappears
    pub const CRUSH_RESPAWN: IVec2 = IVec2::new(WORLD_WIDTH / 2, WORLD_HEIGHT - 24);
}

/// Move `current` toward `target` by at most `increase`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, increase: f32) -> f32 {
    if current < target {
        (current + increase).min(target)
    } else {
        (current - increase).max(target)
    }
}

/// Integer sign: -1, 0 or 1
#[inline]
pub fn sign(value: i32) -> i32 {
    value.signum()
}
