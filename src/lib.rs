//! Pixel Invaders - an arcade mini-game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, actions, reducer, tick engine)
//! - `session`: State owner, frame-scheduler endpoint, persistence boundary
//! - `highscores`: Single-slot high score storage
//! - `input`: Key-code and touch-gesture translation into actions
//! - `tuning`: Data-driven game balance
//!
//! Rendering is not part of this crate: consumers read the immutable
//! [`sim::GameState`] snapshot after each dispatch and draw it however
//! they like.

pub mod highscores;
pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, MemoryStore};
pub use session::GameSession;
pub use sim::{Action, GamePhase, GameState, Key, reduce};
pub use tuning::Tuning;

/// Playfield geometry constants
///
/// All coordinates live in a normalized 0-100 space shared with the
/// renderer; sizes are in the same units.
pub mod consts {
    /// Playfield width
    pub const GAME_WIDTH: f32 = 100.0;
    /// Playfield height
    pub const GAME_HEIGHT: f32 = 100.0;

    /// Player square side and starting position (centered, near the bottom)
    pub const PLAYER_SIZE: f32 = 6.0;
    pub const PLAYER_START_X: f32 = 47.0;
    pub const PLAYER_START_Y: f32 = 85.0;

    /// Enemy square side
    pub const ENEMY_SIZE: f32 = 5.0;
    /// Right edge of the enemy travel band (wall bounce happens here)
    pub const ENEMY_MAX_X: f32 = 95.0;
    /// Enemies and power-ups spawn with x in [0, this)
    pub const SPAWN_MAX_X: f32 = 90.0;

    /// Bullet rectangle
    pub const BULLET_WIDTH: f32 = 1.0;
    pub const BULLET_HEIGHT: f32 = 3.0;
    /// Bullets despawn once fully above the playfield
    pub const BULLET_DESPAWN_Y: f32 = -5.0;

    /// Power-up capsule square side
    pub const POWER_UP_SIZE: f32 = 4.0;

    /// Background star count, fixed for the lifetime of the state
    pub const STAR_COUNT: usize = 30;

    /// Lives at the start of a run
    pub const START_LIVES: u32 = 3;
    /// Level cap
    pub const MAX_LEVEL: u32 = 10;
}

/// Set up logging on wasm32 (console logger + panic hook).
#[cfg(target_arch = "wasm32")]
pub fn init_wasm_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
