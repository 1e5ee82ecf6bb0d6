//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Integer pixel positions with sub-pixel remainders
//! - Stable iteration order (solids in insertion order)
//! - No rendering or platform dependencies beyond the queues handed in

pub mod collision;
pub mod geometry;
pub mod player;
pub mod rules;
pub mod solid;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{collides_with_solids, collides_with_tiles, rect_collision};
pub use geometry::{IRect, grid_index_of, player_hitbox, solid_rect, tile_position, tile_rect};
pub use player::update_player;
pub use rules::{CrushPolicy, LevelRules, PlayerAction, SolidMotion};
pub use solid::update_solids;
pub use state::{CapacityError, GameMode, GameState, Level, Player, PlayerAnimState, Solid};
pub use tick::{TickContext, simulate, update_background};
pub use world::{Tile, WorldGrid};
