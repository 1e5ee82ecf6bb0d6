//! Input collaborator
//!
//! The host writes physical key transitions into [`Input`]; the simulation
//! reads logical actions through [`KeyBindings`]. Edge state ("just pressed")
//! is cleared once per simulation tick, not once per host frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_KEYS_PER_ACTION;

/// Physical keys the game can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    D,
    S,
    W,
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
}

impl KeyCode {
    pub const COUNT: usize = 10;

    const fn index(self) -> usize {
        self as usize
    }
}

/// Logical actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameInput {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Jump or attack, depending on the level ruleset
    Action,
    Pause,
}

impl GameInput {
    pub const COUNT: usize = 6;

    const fn index(self) -> usize {
        self as usize
    }
}

/// State of one physical key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub is_down: bool,
    pub just_pressed: bool,
    pub just_released: bool,
    pub half_transition_count: u8,
}

/// Raw input written by the host
#[derive(Debug, Clone, Default)]
pub struct Input {
    keys: [KeyState; KeyCode::COUNT],
    pub mouse_pos: Vec2,
    pub prev_mouse_pos: Vec2,
    pub rel_mouse: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self, code: KeyCode) -> KeyState {
        self.keys[code.index()]
    }

    /// Record a key going down
    pub fn press(&mut self, code: KeyCode) {
        let key = &mut self.keys[code.index()];
        if !key.is_down {
            key.just_pressed = true;
            key.half_transition_count = key.half_transition_count.saturating_add(1);
        }
        key.is_down = true;
    }

    /// Record a key going up
    pub fn release(&mut self, code: KeyCode) {
        let key = &mut self.keys[code.index()];
        if key.is_down {
            key.just_released = true;
            key.half_transition_count = key.half_transition_count.saturating_add(1);
        }
        key.is_down = false;
    }

    /// Called after every simulation tick
    pub fn end_tick(&mut self) {
        self.rel_mouse = self.mouse_pos - self.prev_mouse_pos;
        self.prev_mouse_pos = self.mouse_pos;

        for key in &mut self.keys {
            key.just_pressed = false;
            key.just_released = false;
            key.half_transition_count = 0;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("action {action:?} already has {} keys bound", MAX_KEYS_PER_ACTION)]
pub struct MappingFullError {
    pub action: GameInput,
}

/// Up to [`MAX_KEYS_PER_ACTION`] keys for one action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapping {
    keys: Vec<KeyCode>,
}

impl KeyMapping {
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    pub fn is_full(&self) -> bool {
        self.keys.len() >= MAX_KEYS_PER_ACTION
    }
}

/// Logical action to physical key table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    mappings: [KeyMapping; GameInput::COUNT],
}

impl KeyBindings {
    /// WASD + arrows, Space for the action, Escape to pause
    pub fn standard() -> Self {
        let defaults: [(GameInput, &[KeyCode]); GameInput::COUNT] = [
            (GameInput::MoveLeft, &[KeyCode::A, KeyCode::Left]),
            (GameInput::MoveRight, &[KeyCode::D, KeyCode::Right]),
            (GameInput::MoveUp, &[KeyCode::W, KeyCode::Up]),
            (GameInput::MoveDown, &[KeyCode::S, KeyCode::Down]),
            (GameInput::Action, &[KeyCode::Space]),
            (GameInput::Pause, &[KeyCode::Escape]),
        ];

        let mut bindings = Self::default();
        for (action, keys) in defaults {
            bindings.mappings[action.index()].keys = keys.to_vec();
        }
        bindings
    }

    pub fn bind(&mut self, action: GameInput, key: KeyCode) -> Result<(), MappingFullError> {
        let mapping = &mut self.mappings[action.index()];
        if mapping.is_full() {
            return Err(MappingFullError { action });
        }
        mapping.keys.push(key);
        Ok(())
    }

    pub fn mapping(&self, action: GameInput) -> &KeyMapping {
        &self.mappings[action.index()]
    }

    pub fn is_down(&self, input: &Input, action: GameInput) -> bool {
        self.mapping(action)
            .keys
            .iter()
            .any(|&key| input.key(key).is_down)
    }

    pub fn just_pressed(&self, input: &Input, action: GameInput) -> bool {
        self.mapping(action)
            .keys
            .iter()
            .any(|&key| input.key(key).just_pressed)
    }
}
