//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly `UPDATE_DELAY`. Order inside a level
//! tick matters: the player moves first, then solids read the player's new
//! position and write the speed it inherits on its next jump.

use glam::{IVec2, Vec4};

use super::geometry::{IRect, grid_index_of};
use super::player::update_player;
use super::solid::update_solids;
use super::state::{GameMode, GameState};
use crate::assets::SpriteId;
use crate::consts::*;
use crate::input::{GameInput, Input};
use crate::render::{DrawData, Layer, RenderData};
use crate::sound::SoundState;
use crate::ui::{MenuButton, UiState};

/// Collaborators a tick may touch
pub struct TickContext<'a> {
    pub render: &'a mut RenderData,
    pub input: &'a Input,
    pub sound: &'a mut SoundState,
    pub ui: &'a mut UiState,
}

/// Advance the game state by one fixed timestep
pub fn simulate(state: &mut GameState, ctx: &mut TickContext<'_>) {
    let dt = UPDATE_DELAY;

    match state.mode {
        GameMode::InLevel1 | GameMode::InLevel2 => update_level(state, ctx, dt),
        GameMode::MainMenu => update_main_menu(state, ctx.ui),
    }
}

fn update_level(state: &mut GameState, ctx: &mut TickContext<'_>, dt: f32) {
    if state.key_bindings.just_pressed(ctx.input, GameInput::Pause) {
        log::info!("Paused, back to main menu");
        state.mode = GameMode::MainMenu;
        return;
    }

    update_background(state);

    update_player(state, ctx.render, ctx.sound, ctx.input, dt);

    let player = &state.player;
    ctx.render.game_camera.position.x = player.pos.x as f32;
    ctx.render.game_camera.position.y = -(player.pos.y as f32);

    update_solids(state, dt);
}

/// Rebuild the window of background tiles centred on the player's cell
pub fn update_background(state: &mut GameState) {
    let player_tile = grid_index_of(state.player.pos);

    state.background_tiles.clear();

    let start_x = player_tile.x * TILESIZE - TILESIZE * (NUM_OF_TILE_COLUMNS / 2);
    let start_y = player_tile.y * TILESIZE + TILESIZE * (NUM_OF_TILE_ROWS / 2);
    for column in 0..NUM_OF_TILE_COLUMNS {
        for row in 0..NUM_OF_TILE_ROWS {
            state.background_tiles.push(IRect::new(
                IVec2::new(start_x + column * TILESIZE, start_y - row * TILESIZE),
                IVec2::splat(TILESIZE),
            ));
        }
    }
}

fn update_main_menu(state: &mut GameState, ui: &mut UiState) {
    let buttons = [
        (
            MenuButton::PlayLevel1,
            IVec2::new(WORLD_WIDTH / 2, WORLD_HEIGHT / 2),
            GameMode::InLevel1,
            Vec4::new(0.0, 1.0, 0.0, 1.0),
        ),
        (
            MenuButton::PlayLevel2,
            IVec2::new(WORLD_WIDTH / 2, WORLD_HEIGHT * 3 / 4),
            GameMode::InLevel2,
            Vec4::new(1.0, 0.0, 0.0, 1.0),
        ),
    ];

    for (button, pos, mode, hot_color) in buttons {
        let mut draw_data = DrawData::on_layer(Layer::Ui, 10.0);
        if ui.is_hot(button) {
            draw_data.color = hot_color;
        }

        if ui.do_button(button, SpriteId::ButtonPlay, pos, draw_data) {
            log::info!("Entering {:?}", mode);
            state.mode = mode;
        }
    }
}
