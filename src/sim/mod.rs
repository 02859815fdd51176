//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Single-threaded, one action at a time
//! - Seeded RNG carried inside the state
//! - Wall-clock timestamps arrive inside actions, never read ambiently
//! - No rendering or platform dependencies

pub mod action;
pub mod collision;
pub mod reducer;
pub mod state;
pub mod tick;

pub use action::{Action, Key};
pub use collision::overlaps;
pub use reducer::reduce;
pub use state::{GameObject, GamePhase, GameState, KeyIntents, Message, ObjectKind, Tint};
