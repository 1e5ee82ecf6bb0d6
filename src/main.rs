//! Fields of Oblivion entry point
//!
//! Native builds run a headless scripted session: the menu picks a level, the
//! player runs and jumps, and positions are logged while the scheduler runs.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fields_of_oblivion::consts::UPDATE_DELAY;
    use fields_of_oblivion::input::{Input, KeyCode};
    use fields_of_oblivion::render::RenderData;
    use fields_of_oblivion::sim::GameState;
    use fields_of_oblivion::sound::SoundState;
    use fields_of_oblivion::ui::{MenuButton, UiState};
    use fields_of_oblivion::{Settings, update_game};

    env_logger::init();
    log::info!("Fields of Oblivion (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".to_string());
    let settings = Settings::load_or_default(&settings_path);

    let mut state = GameState::with_settings(&settings);
    let mut render = RenderData::new();
    let mut input = Input::new();
    let mut sound = SoundState::new();
    let mut ui = UiState::new();

    // Uneven host frame times exercise catch-up and interpolation
    let frame_times = [UPDATE_DELAY * 0.6, UPDATE_DELAY * 1.3, UPDATE_DELAY * 2.2];

    for frame in 0..240 {
        match frame {
            1 => ui.clicked = Some(MenuButton::PlayLevel2),
            10 => input.press(KeyCode::D),
            60 => input.press(KeyCode::Space),
            62 => input.release(KeyCode::Space),
            120 => {
                input.release(KeyCode::D);
                input.press(KeyCode::A);
            }
            180 => input.release(KeyCode::A),
            _ => {}
        }

        let dt = frame_times[frame % frame_times.len()];
        let report = update_game(&mut state, &mut render, &mut input, &mut sound, &mut ui, dt);

        for request in sound.drain() {
            log::info!("Sound: {} (looping: {})", request.name, request.options.looping);
        }

        if frame % 30 == 0 {
            log::info!(
                "Frame {:3} mode {:?} ticks {} alpha {:.2} player {:?} sprites {}",
                frame,
                state.mode,
                report.ticks,
                report.alpha,
                state.player.pos,
                render.sprites.len()
            );
        }
        render.clear();
    }

    log::info!("Session finished with player at {:?}", state.player.pos);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding host on the web
}
