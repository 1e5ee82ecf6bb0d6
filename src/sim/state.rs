//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here and is owned by the host.
//! Entities never point at each other; they meet through collision rects.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::IRect;
use super::rules::LevelRules;
use super::world::WorldGrid;
use crate::assets::SpriteId;
use crate::consts::{MAX_KEYFRAMES, MAX_SOLIDS_PER_LEVEL};
use crate::input::KeyBindings;
use crate::settings::{MovementTuning, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("level already holds {} solids", MAX_SOLIDS_PER_LEVEL)]
    Solids,
    #[error("solid already has {} keyframes", MAX_KEYFRAMES)]
    Keyframes,
}

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    MainMenu,
    InLevel1,
    InLevel2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerAnimState {
    #[default]
    Idle,
    Run,
}

impl PlayerAnimState {
    pub const COUNT: usize = 2;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The player character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    /// Position at the start of the current tick (render interpolation)
    pub prev_pos: IVec2,
    /// Velocity in pixels per tick
    pub speed: Vec2,
    /// Velocity handed over by the last solid that pushed us
    pub solid_speed: Vec2,
    /// Sub-pixel movement carried between ticks
    pub remainder: Vec2,
    /// `None` until the first update seeds it from the level rules
    pub grounded: Option<bool>,
    /// Facing left
    pub flip_x: bool,
    pub run_anim_time: f32,
    pub animation_state: PlayerAnimState,
    pub animation_sprites: [SpriteId; PlayerAnimState::COUNT],
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            prev_pos: pos,
            animation_sprites: [SpriteId::Celeste, SpriteId::CelesteRun],
            ..Default::default()
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded.unwrap_or(false)
    }

    pub fn hitbox(&self) -> IRect {
        super::geometry::player_hitbox(self.pos)
    }

    pub fn current_sprite(&self) -> SpriteId {
        self.animation_sprites[self.animation_state.index()]
    }
}

/// A moving platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solid {
    pub sprite: SpriteId,
    pub pos: IVec2,
    pub prev_pos: IVec2,
    /// Sub-pixel movement carried between ticks
    pub remainder: Vec2,
    /// Pixels per second on each axis
    pub speed: Vec2,
    pub keyframe_idx: usize,
    keyframes: Vec<IVec2>,
}

impl Solid {
    pub fn new(sprite: SpriteId, pos: IVec2) -> Self {
        Self {
            sprite,
            pos,
            prev_pos: pos,
            remainder: Vec2::ZERO,
            speed: Vec2::ZERO,
            keyframe_idx: 0,
            keyframes: Vec::with_capacity(MAX_KEYFRAMES),
        }
    }

    /// Solid starting on its first keyframe
    pub fn shuttle(
        sprite: SpriteId,
        from: IVec2,
        to: IVec2,
        speed: Vec2,
    ) -> Result<Self, CapacityError> {
        let mut solid = Self::new(sprite, from);
        solid.speed = speed;
        solid.add_keyframe(from)?;
        solid.add_keyframe(to)?;
        Ok(solid)
    }

    pub fn add_keyframe(&mut self, keyframe: IVec2) -> Result<(), CapacityError> {
        if self.keyframes.len() >= MAX_KEYFRAMES {
            return Err(CapacityError::Keyframes);
        }
        self.keyframes.push(keyframe);
        Ok(())
    }

    pub fn keyframes(&self) -> &[IVec2] {
        &self.keyframes
    }

    pub fn keyframe_mut(&mut self, idx: usize) -> Option<&mut IVec2> {
        self.keyframes.get_mut(idx)
    }

    pub fn current_keyframe(&self) -> Option<IVec2> {
        self.keyframes.get(self.keyframe_idx).copied()
    }

    pub fn next_keyframe_idx(&self) -> Option<usize> {
        if self.keyframes.is_empty() {
            None
        } else {
            Some((self.keyframe_idx + 1) % self.keyframes.len())
        }
    }

    pub fn next_keyframe(&self) -> Option<IVec2> {
        self.next_keyframe_idx().map(|idx| self.keyframes[idx])
    }
}

/// Per-level ruleset and solids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub rules: LevelRules,
    solids: Vec<Solid>,
}

impl Level {
    pub fn new(rules: LevelRules) -> Self {
        Self {
            rules,
            solids: Vec::with_capacity(MAX_SOLIDS_PER_LEVEL),
        }
    }

    pub fn add_solid(&mut self, solid: Solid) -> Result<(), CapacityError> {
        if self.solids.len() >= MAX_SOLIDS_PER_LEVEL {
            return Err(CapacityError::Solids);
        }
        self.solids.push(solid);
        Ok(())
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn solids_mut(&mut self) -> &mut [Solid] {
        &mut self.solids
    }

    pub fn clear_solids(&mut self) {
        self.solids.clear();
    }
}

/// Complete simulation state, owned by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    /// Unsimulated real time (seconds)
    pub update_timer: f32,
    pub initialized: bool,
    pub player: Player,
    pub level_1: Level,
    pub level_2: Level,
    /// Background tiles around the player, rebuilt each level tick
    pub background_tiles: Vec<IRect>,
    pub world: WorldGrid,
    pub key_bindings: KeyBindings,
    pub tuning: MovementTuning,
    /// Clamp on real time accepted per host frame
    pub max_frame_time: Option<f32>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Uninitialized state; the first `update_game` call populates it
    pub fn new() -> Self {
        Self {
            mode: GameMode::MainMenu,
            update_timer: 0.0,
            initialized: false,
            player: Player::new(IVec2::ZERO),
            level_1: Level::new(LevelRules::level_1()),
            level_2: Level::new(LevelRules::level_2()),
            background_tiles: Vec::new(),
            world: WorldGrid::new(),
            key_bindings: KeyBindings::default(),
            tuning: MovementTuning::default(),
            max_frame_time: None,
        }
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let mut state = Self::new();
        state.apply_settings(settings);
        state
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.tuning = settings.tuning;
        self.max_frame_time = settings.max_frame_time;
    }

    /// Level simulated by the current mode
    pub fn active_level(&self) -> Option<&Level> {
        match self.mode {
            GameMode::InLevel1 => Some(&self.level_1),
            GameMode::InLevel2 => Some(&self.level_2),
            GameMode::MainMenu => None,
        }
    }

    pub fn active_level_mut(&mut self) -> Option<&mut Level> {
        match self.mode {
            GameMode::InLevel1 => Some(&mut self.level_1),
            GameMode::InLevel2 => Some(&mut self.level_2),
            GameMode::MainMenu => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_capacity() {
        let mut level = Level::new(LevelRules::level_2());
        for i in 0..MAX_SOLIDS_PER_LEVEL {
            level
                .add_solid(Solid::new(SpriteId::Solid02, IVec2::new(i as i32, 0)))
                .unwrap();
        }
        assert_eq!(
            level.add_solid(Solid::new(SpriteId::Solid02, IVec2::ZERO)),
            Err(CapacityError::Solids)
        );
        assert_eq!(level.solids().len(), MAX_SOLIDS_PER_LEVEL);
    }

    #[test]
    fn test_keyframe_capacity_and_cycle() {
        let mut solid = Solid::shuttle(
            SpriteId::Solid02,
            IVec2::new(16, 80),
            IVec2::new(80, 80),
            Vec2::new(20.0, 0.0),
        )
        .unwrap();
        assert_eq!(solid.add_keyframe(IVec2::ZERO), Err(CapacityError::Keyframes));
        assert_eq!(solid.next_keyframe(), Some(IVec2::new(80, 80)));

        solid.keyframe_idx = 1;
        assert_eq!(solid.next_keyframe_idx(), Some(0));
    }

    #[test]
    fn test_no_keyframes() {
        let solid = Solid::new(SpriteId::Solid01, IVec2::ZERO);
        assert_eq!(solid.next_keyframe(), None);
        assert_eq!(solid.current_keyframe(), None);
    }

    #[test]
    fn test_active_level_follows_mode() {
        let mut state = GameState::new();
        assert!(state.active_level().is_none());
        state.mode = GameMode::InLevel2;
        assert_eq!(
            state.active_level().map(|l| l.rules),
            Some(LevelRules::level_2())
        );
    }

    #[test]
    fn test_settings_applied() {
        let settings = Settings {
            max_frame_time: Some(0.1),
            ..Default::default()
        };
        let state = GameState::with_settings(&settings);
        assert_eq!(state.max_frame_time, Some(0.1));
        assert_eq!(state.tuning, settings.tuning);
        assert!(!state.initialized);
    }

    #[test]
    fn test_state_serializes() {
        let mut state = GameState::new();
        state.player.pos = IVec2::new(3, 4);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.player.pos, IVec2::new(3, 4));
        assert_eq!(back.mode, GameMode::MainMenu);
    }
}
