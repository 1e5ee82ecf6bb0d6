//! Player motion
//!
//! Velocity is integrated with `approach`, then applied as whole-pixel steps,
//! X before Y. Each pixel is checked against solids and the nearby tile window
//! before it is committed; the first hit zeroes that axis.

use glam::IVec2;

use super::collision::{collides_with_solids, collides_with_tiles};
use super::geometry::player_hitbox;
use super::rules::PlayerAction;
use super::state::{GameMode, GameState, Player, PlayerAnimState, Solid};
use super::world::WorldGrid;
use crate::approach;
use crate::assets::SpriteId;
use crate::input::{GameInput, Input};
use crate::render::{DrawData, Layer, RenderData};
use crate::settings::MovementTuning;
use crate::sound::{SoundOptions, SoundState};

const AXIS_X: usize = 0;
const AXIS_Y: usize = 1;

/// Advance the player by one tick under the active level's rules
pub fn update_player(
    state: &mut GameState,
    render: &mut RenderData,
    sound: &mut SoundState,
    input: &Input,
    dt: f32,
) {
    let GameState {
        mode,
        player,
        level_1,
        level_2,
        world,
        key_bindings,
        tuning,
        ..
    } = state;

    let level = match mode {
        GameMode::InLevel1 => &*level_1,
        GameMode::InLevel2 => &*level_2,
        GameMode::MainMenu => return,
    };
    let rules = &level.rules;
    let solids = level.solids();
    let down = |action| key_bindings.is_down(input, action);

    player.prev_pos = player.pos;
    player.animation_state = PlayerAnimState::Idle;
    player.grounded.get_or_insert(rules.grounded_default);

    // Facing
    if player.speed.x > 0.0 {
        player.flip_x = false;
    }
    if player.speed.x < 0.0 {
        player.flip_x = true;
    }

    if key_bindings.just_pressed(input, GameInput::Action) && player.is_grounded() {
        match rules.action {
            PlayerAction::Jump => {
                player.speed.y = tuning.jump_speed + player.solid_speed.y;
                player.speed.x += player.solid_speed.x;
                player.grounded = Some(false);
                sound.play_sound("jump", SoundOptions::default());
            }
            PlayerAction::Attack => {
                render.draw_sprite(
                    SpriteId::BasicProjectile,
                    player.pos,
                    DrawData::on_layer(Layer::Game, 2.0),
                );
            }
        }
    }

    let x_dir = if down(GameInput::MoveLeft) {
        -1.0
    } else if down(GameInput::MoveRight) {
        1.0
    } else {
        0.0
    };
    let y_dir = if down(GameInput::MoveUp) {
        -1.0
    } else if down(GameInput::MoveDown) {
        1.0
    } else {
        0.0
    };

    if x_dir != 0.0 {
        run_toward(player, AXIS_X, x_dir, tuning, dt);
    }
    if y_dir != 0.0 {
        run_toward(player, AXIS_Y, y_dir, tuning, dt);
    }

    // Combined input must not exceed the single-axis cap
    if x_dir != 0.0 && y_dir != 0.0 {
        let magnitude = player.speed.length();
        if magnitude > 0.0 {
            player.speed = player.speed / magnitude * tuning.run_speed;
        }
    }

    if rules.friction {
        if x_dir == 0.0 {
            let reduce = if player.is_grounded() {
                tuning.run_reduce
            } else {
                tuning.fly_reduce
            };
            player.speed.x = approach(player.speed.x, 0.0, reduce * dt);
        }
        if y_dir == 0.0 {
            player.speed.y = approach(player.speed.y, 0.0, tuning.run_reduce * dt);
        }
    }

    if rules.gravity {
        player.speed.y = approach(player.speed.y, tuning.fall_speed, tuning.gravity * dt);

        if rules.debug_reset_on_up && down(GameInput::MoveUp) {
            player.pos = IVec2::ZERO;
        }
    }

    // Move X
    if move_axis(player, AXIS_X, solids, world) {
        player.speed.x = 0.0;
    }
    render.game_camera.position.x = player.pos.x as f32;

    // Move Y
    let falling = player.speed.y > 0.0;
    let start_y = player.pos.y;
    if move_axis(player, AXIS_Y, solids, world) {
        player.speed.y = 0.0;
        if falling && rules.ground_on_landing {
            player.grounded = Some(true);
        }
    } else if rules.ground_on_landing && player.pos.y > start_y {
        // Dropped freely this tick: walked off a ledge
        player.grounded = Some(false);
    }
    render.game_camera.position.y = -(player.pos.y as f32);
}

/// Accelerate one axis toward `dir * run_speed`, faster when reversing
fn run_toward(player: &mut Player, axis: usize, dir: f32, tuning: &MovementTuning, dt: f32) {
    if player.is_grounded() {
        player.animation_state = PlayerAnimState::Run;
    }
    player.run_anim_time += dt;

    let current = player.speed[axis];
    let mult = if current * dir < 0.0 {
        tuning.reversal_multiplier
    } else {
        1.0
    };
    player.speed[axis] = approach(
        current,
        dir * tuning.run_speed,
        tuning.run_acceleration * mult * dt,
    );
}

/// Accumulate speed on one axis and step whole pixels. Returns true when blocked.
fn move_axis(player: &mut Player, axis: usize, solids: &[Solid], world: &WorldGrid) -> bool {
    player.remainder[axis] += player.speed[axis];
    let amount = player.remainder[axis].round();
    // Consumed even if a collision cuts the move short
    player.remainder[axis] -= amount;

    let amount = amount as i32;
    let mut step = IVec2::ZERO;
    step[axis] = amount.signum();
    for _ in 0..amount.abs() {
        let next = player_hitbox(player.pos + step);
        if collides_with_solids(solids, next) || collides_with_tiles(world, next, player.pos) {
            return true;
        }
        player.pos += step;
    }
    false
}

/// One player tick in level 1 with its rules replaced
#[cfg(test)]
pub(crate) fn tick_with_rules(
    state: &mut GameState,
    rules: super::rules::LevelRules,
    input: &Input,
) -> (RenderData, SoundState) {
    let mut render = RenderData::new();
    let mut sound = SoundState::new();
    state.mode = GameMode::InLevel1;
    state.level_1.rules = rules;
    update_player(state, &mut render, &mut sound, input, crate::consts::UPDATE_DELAY);
    (render, sound)
}
