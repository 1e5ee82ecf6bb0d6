//! Host entry point and fixed-timestep scheduler
//!
//! The host calls [`update_game`] once per rendered frame with the real time
//! that elapsed. Simulation runs in whole `UPDATE_DELAY` ticks; whatever is
//! left over becomes the interpolation factor for drawing.

use glam::{IVec2, Vec2};

use crate::assets::{SpriteId, get_sprite};
use crate::consts::*;
use crate::input::{Input, KeyBindings};
use crate::render::{DrawData, Layer, RenderData, animate, lerp_ivec2};
use crate::sim::state::{CapacityError, GameState, Level, Solid};
use crate::sim::tick::{TickContext, simulate};
use crate::sound::{SoundOptions, SoundState};
use crate::ui::UiState;

/// What one host frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Simulation ticks run this frame
    pub ticks: u32,
    /// Leftover fraction of a tick, in `[0, 1)`
    pub alpha: f32,
}

/// Run every due simulation tick, then queue this frame's sprites
///
/// The first call initializes the world. At most `MAX_SUBSTEPS` ticks run per
/// call; backlog beyond that is dropped. Draw commands are appended to
/// `render.sprites`; the host presents and clears them.
pub fn update_game(
    state: &mut GameState,
    render: &mut RenderData,
    input: &mut Input,
    sound: &mut SoundState,
    ui: &mut UiState,
    dt: f32,
) -> FrameReport {
    if !state.initialized {
        init_world(state, render, sound);
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let frame_time = match state.max_frame_time {
        Some(max) => dt.min(max),
        None => dt,
    };
    state.update_timer += frame_time;

    let mut ticks = 0;
    while state.update_timer >= UPDATE_DELAY && ticks < MAX_SUBSTEPS {
        state.update_timer -= UPDATE_DELAY;
        ui.update();

        let mut ctx = TickContext {
            render: &mut *render,
            input: &*input,
            sound: &mut *sound,
            ui: &mut *ui,
        };
        simulate(state, &mut ctx);

        // Edges are per tick so a press is seen exactly once
        input.end_tick();
        ticks += 1;
    }

    if state.update_timer >= UPDATE_DELAY {
        log::debug!(
            "Dropping {:.3}s of simulation backlog after {} ticks",
            state.update_timer,
            ticks
        );
        state.update_timer = state.update_timer.rem_euclid(UPDATE_DELAY);
    }

    let alpha = state.update_timer / UPDATE_DELAY;
    render_frame(state, render, ui, alpha);

    FrameReport { ticks, alpha }
}

/// One-time world setup
pub fn init_world(state: &mut GameState, render: &mut RenderData, sound: &mut SoundState) {
    sound.play_sound("First Steps", SoundOptions::LOOP);

    let dimensions = Vec2::new(WORLD_WIDTH as f32, WORLD_HEIGHT as f32);
    let center = Vec2::new(WORLD_WIDTH as f32 / 2.0, -(WORLD_HEIGHT as f32) / 2.0);
    render.game_camera.dimensions = dimensions;
    render.game_camera.position = center;
    render.ui_camera.dimensions = dimensions;
    render.ui_camera.position = center;

    state.player.animation_sprites = [SpriteId::Celeste, SpriteId::CelesteRun];
    state.key_bindings = KeyBindings::standard();

    for level in [&mut state.level_1, &mut state.level_2] {
        if let Err(e) = seed_solids(level) {
            log::warn!("Could not place default solids: {}", e);
        }
    }

    state.initialized = true;
    log::info!(
        "World initialized: {} + {} solids, player at {:?}",
        state.level_1.solids().len(),
        state.level_2.solids().len(),
        state.player.pos
    );
}

/// The two platforms every level starts with
fn seed_solids(level: &mut Level) -> Result<(), CapacityError> {
    let speed = Vec2::new(20.0, 20.0);
    level.clear_solids();
    level.add_solid(Solid::shuttle(
        SpriteId::Solid02,
        IVec2::new(8 * 2, 8 * 10),
        IVec2::new(8 * 10, 8 * 10),
        speed,
    )?)?;
    level.add_solid(Solid::shuttle(
        SpriteId::Solid02,
        IVec2::new(12 * 20, 8 * 10),
        IVec2::new(12 * 20, 8 * 20),
        speed,
    )?)?;
    Ok(())
}

/// Queue background, UI, solids and player, blending tick snapshots by `alpha`
pub fn render_frame(state: &mut GameState, render: &mut RenderData, ui: &UiState, alpha: f32) {
    // Background first
    let tile_data = DrawData::on_layer(Layer::Game, 0.0);
    for tile in &state.background_tiles {
        render.draw_sprite(SpriteId::TileGrass01, tile.pos, tile_data);
    }

    for element in &ui.elements {
        render.draw_sprite(element.sprite, element.pos, element.draw_data);
    }

    let Some(level) = state.active_level() else {
        return;
    };
    for solid in level.solids() {
        let pos = lerp_ivec2(solid.prev_pos, solid.pos, alpha);
        render.draw_sprite(solid.sprite, pos, DrawData::on_layer(Layer::Game, 1.0));
    }

    let run_anim_duration = state.tuning.run_anim_duration;
    let player = &mut state.player;
    let pos = lerp_ivec2(player.prev_pos, player.pos, alpha);
    let sprite = player.current_sprite();
    let animation_idx = animate(
        &mut player.run_anim_time,
        get_sprite(sprite).frame_count,
        run_anim_duration,
    );
    render.draw_sprite(
        sprite,
        pos,
        DrawData {
            animation_idx,
            flip_x: player.flip_x,
            ..DrawData::on_layer(Layer::Game, 2.0)
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::sim::state::GameMode;

    struct Host {
        render: RenderData,
        input: Input,
        sound: SoundState,
        ui: UiState,
    }

    impl Host {
        fn new() -> Self {
            Self {
                render: RenderData::new(),
                input: Input::new(),
                sound: SoundState::new(),
                ui: UiState::new(),
            }
        }

        fn frame(&mut self, state: &mut GameState, dt: f32) -> FrameReport {
            update_game(
                state,
                &mut self.render,
                &mut self.input,
                &mut self.sound,
                &mut self.ui,
                dt,
            )
        }
    }

    #[test]
    fn test_first_call_initializes_world() {
        let mut state = GameState::new();
        let mut host = Host::new();
        let report = host.frame(&mut state, 0.0);

        assert_eq!(report.ticks, 0);
        assert!(state.initialized);
        assert_eq!(state.level_1.solids().len(), 2);
        assert_eq!(state.level_2.solids().len(), 2);
        assert_eq!(state.level_1.solids()[0].pos, IVec2::new(16, 80));
        assert_eq!(state.key_bindings, KeyBindings::standard());
        assert_eq!(host.sound.queue[0].name, "First Steps");
        assert!(host.sound.queue[0].options.looping);
        assert_eq!(host.render.game_camera.dimensions, Vec2::new(640.0, 360.0));

        // Second call does not re-seed
        host.frame(&mut state, 0.0);
        assert_eq!(host.sound.queue.len(), 1);
    }

    #[test]
    fn test_short_frames_run_no_ticks() {
        let mut state = GameState::new();
        let mut host = Host::new();

        let report = host.frame(&mut state, 0.005);
        assert_eq!(report.ticks, 0);
        let report = host.frame(&mut state, 0.005);
        assert_eq!(report.ticks, 0);
        assert!((report.alpha - 0.01 / UPDATE_DELAY).abs() < 1e-4);
        assert!((state.update_timer - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_slow_frame_catches_up() {
        let mut state = GameState::new();
        let mut host = Host::new();

        let report = host.frame(&mut state, UPDATE_DELAY * 3.5);
        assert_eq!(report.ticks, 3);
        assert!((report.alpha - 0.5).abs() < 1e-3);
        assert!(report.alpha < 1.0);
    }

    #[test]
    fn test_max_frame_time_clamps_backlog() {
        let mut state = GameState::new();
        state.max_frame_time = Some(UPDATE_DELAY * 2.5);
        let mut host = Host::new();

        let report = host.frame(&mut state, 10.0);
        assert_eq!(report.ticks, 2);
    }

    #[test]
    fn test_long_pause_is_bounded() {
        let mut state = GameState::new();
        let mut host = Host::new();

        let report = host.frame(&mut state, 3600.0);
        assert_eq!(report.ticks, MAX_SUBSTEPS);
        assert!(state.update_timer < UPDATE_DELAY);
        assert!((0.0..1.0).contains(&report.alpha));

        // Normal pacing resumes on the next frame
        let report = host.frame(&mut state, UPDATE_DELAY);
        assert!(report.ticks <= 1);
    }

    #[test]
    fn test_huge_backlog_still_returns() {
        let mut state = GameState::new();
        let mut host = Host::new();
        host.frame(&mut state, 0.0);

        // Past the point where subtracting one tick no longer changes an f32
        state.update_timer = 2.0e6;
        let report = host.frame(&mut state, 0.0);
        assert_eq!(report.ticks, MAX_SUBSTEPS);
        assert!(state.update_timer < UPDATE_DELAY);
        assert!(report.alpha.is_finite());
    }

    #[test]
    fn test_bad_frame_time_is_ignored() {
        let mut state = GameState::new();
        let mut host = Host::new();

        assert_eq!(host.frame(&mut state, f32::INFINITY).ticks, 0);
        assert_eq!(host.frame(&mut state, f32::NAN).ticks, 0);
        assert_eq!(host.frame(&mut state, -1.0).ticks, 0);
        assert_eq!(state.update_timer, 0.0);
    }

    #[test]
    fn test_just_pressed_seen_on_first_tick_only() {
        let mut state = GameState::new();
        let mut host = Host::new();
        host.frame(&mut state, 0.0);
        state.mode = GameMode::InLevel2;

        host.input.press(KeyCode::Space);
        let report = host.frame(&mut state, UPDATE_DELAY * 2.5);
        assert_eq!(report.ticks, 2);

        let jumps = host.sound.queue.iter().filter(|s| s.name == "jump").count();
        assert_eq!(jumps, 1);
        assert_eq!(state.player.grounded, Some(false));
    }

    #[test]
    fn test_render_interpolates_player() {
        let mut state = GameState::new();
        state.mode = GameMode::InLevel1;
        state.player.prev_pos = IVec2::new(0, 0);
        state.player.pos = IVec2::new(10, 4);
        state.player.flip_x = true;

        let mut render = RenderData::new();
        render_frame(&mut state, &mut render, &UiState::new(), 0.5);

        let player_draw = render.sprites.last().unwrap();
        assert_eq!(player_draw.sprite, SpriteId::Celeste);
        assert_eq!(player_draw.pos, IVec2::new(5, 2));
        assert!(player_draw.data.flip_x);
    }

    #[test]
    fn test_menu_draws_no_entities() {
        let mut state = GameState::new();
        let mut render = RenderData::new();
        render_frame(&mut state, &mut render, &UiState::new(), 0.0);
        assert!(render.sprites.is_empty());
    }
}
