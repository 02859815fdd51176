//! Pixel Invaders entry point
//!
//! The simulation core is headless; this binary drives a short scripted
//! run at a synthetic 60 Hz clock and prints the outcome, which doubles
//! as a smoke test of the whole action pipeline.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use pixel_invaders::sim::{Action, Key};
    use pixel_invaders::{GameSession, MemoryStore};

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0x5eed);
    log::info!("Pixel Invaders (headless) starting with seed {seed}");

    let mut session = GameSession::new(MemoryStore::default(), seed);
    session.dispatch(&Action::StartGame);
    session.dispatch(&Action::KeyDown(Key::Shoot));

    // One simulated minute: hold fire and patrol left/right on a
    // synthetic 60 Hz clock.
    let frame_ms = 1_000.0 / 60.0;
    let mut now_ms = 0.0;
    for frame in 0..3_600u32 {
        if frame % 120 == 0 {
            let go_left = (frame / 120) % 2 == 0;
            session.dispatch(&Action::KeyDown(if go_left {
                Key::MoveLeft
            } else {
                Key::MoveRight
            }));
            session.dispatch(&Action::KeyUp(if go_left {
                Key::MoveRight
            } else {
                Key::MoveLeft
            }));
        }
        now_ms += frame_ms;
        session.frame(now_ms);
        if session.state().phase == pixel_invaders::GamePhase::GameOver {
            break;
        }
    }

    let state = session.state();
    println!(
        "run finished: phase {:?}, score {}, level {}, lives {}, high score {}",
        state.phase, state.score, state.level, state.lives, state.high_score
    );
    println!(
        "field: {} enemies, {} bullets, {} capsules, {} stars",
        state.enemies.len(),
        state.bullets.len(),
        state.power_ups.len(),
        state.stars.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is driven by the host page through the library API.
    pixel_invaders::init_wasm_logging();
}
