//! Asteroid Field entry point
//!
//! Runs a scripted headless game and logs what it would have drawn.
//! Usage: `asteroid-field [settings.json]`

use asteroid_field::renderer::ShapeCounter;
use asteroid_field::sim::{GameState, TickInput, tick};
use asteroid_field::{Action, ActionState, Settings, Viewport};

const DEMO_SEED: u64 = 0x5eed_a57e;
const DEMO_FRAMES: u64 = 3600;

/// Scripted pilot: circles the field, firing steadily with occasional spreads and rings
fn scripted_actions(frame: u64, actions: &mut ActionState) {
    actions.release_all();
    let phase = (frame / 120) % 4;
    let steer = match phase {
        0 => Action::MoveUp,
        1 => Action::MoveRight,
        2 => Action::MoveDown,
        _ => Action::MoveLeft,
    };
    if frame % 3 != 0 {
        actions.set(steer, true);
    }
    actions.set(Action::Fire, true);
    if frame % 200 < 40 {
        actions.set(Action::TripleFire, true);
    }
    if frame % 600 == 599 {
        actions.set(Action::Burst, true);
    }
}

fn load_settings() -> Settings {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        }),
        None => Settings::default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    let viewport = Viewport::new(1280.0, 720.0);
    let mut state = GameState::new(DEMO_SEED, load_settings(), viewport);
    let mut actions = ActionState::default();
    let mut counter = ShapeCounter::default();

    for frame in 0..DEMO_FRAMES {
        if !state.running {
            break;
        }
        scripted_actions(frame, &mut actions);
        tick(&mut state, &TickInput::from(&actions), viewport, &mut counter);
    }

    log::info!(
        "Demo finished: {} ticks, score {}, {} hazards alive, {} entities, {} shapes drawn ({} points)",
        state.time_ticks,
        state.score,
        state.hazard_count(),
        state.entities.len(),
        counter.shapes,
        counter.points
    );
    if let Some(player) = state.player() {
        log::info!("Player health {}/{}", player.health, player.max_health);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives the library directly
}
