//! Level rulesets
//!
//! Both levels share one player routine and one solid routine; what differs
//! between them is captured here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What the action button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Vertical impulse plus any speed inherited from a solid
    Jump,
    /// Spawns a projectile sprite, no velocity change
    Attack,
}

/// How solids pick their direction each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidMotion {
    /// Head toward the player's hitbox
    ChasePlayer,
    /// Shuttle between keyframes
    PingPong,
}

/// What happens when a solid pushes the player into a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrushPolicy {
    /// Detected and logged; the push is simply withheld
    #[default]
    Ignore,
    /// Teleport the player to `CRUSH_RESPAWN`
    ResetToSpawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRules {
    pub action: PlayerAction,
    pub friction: bool,
    pub gravity: bool,
    /// Grounded state the player starts with
    pub grounded_default: bool,
    /// Grounded follows vertical contact: set when a downward step is blocked,
    /// cleared when the player drops a pixel without landing
    pub ground_on_landing: bool,
    /// Development aid: holding up snaps the player to the origin while gravity is on
    pub debug_reset_on_up: bool,
    pub solid_motion: SolidMotion,
    /// Overwrite keyframe 0 with the live player position every tick
    pub track_player_keyframe: bool,
    /// Divisor applied to a solid's speed before handing it to the player
    pub carry_damping: Vec2,
    pub crush: CrushPolicy,
}

impl LevelRules {
    /// Top-down arena: chasing solids, attack button
    pub fn level_1() -> Self {
        Self {
            action: PlayerAction::Attack,
            friction: true,
            gravity: false,
            grounded_default: true,
            ground_on_landing: false,
            debug_reset_on_up: false,
            solid_motion: SolidMotion::ChasePlayer,
            track_player_keyframe: true,
            carry_damping: Vec2::new(20.0, 20.0),
            crush: CrushPolicy::Ignore,
        }
    }

    /// Platforming: shuttling solids, jump button
    pub fn level_2() -> Self {
        Self {
            action: PlayerAction::Jump,
            friction: true,
            gravity: true,
            grounded_default: true,
            ground_on_landing: true,
            debug_reset_on_up: false,
            solid_motion: SolidMotion::PingPong,
            track_player_keyframe: false,
            carry_damping: Vec2::new(20.0, 40.0),
            crush: CrushPolicy::Ignore,
        }
    }
}
