//! Action vocabulary - the finite set of stimuli the simulation accepts
//!
//! Actions that depend on the wall clock carry their timestamp, stamped
//! at the boundary (scheduler or input adapter). The reducer itself
//! never reads a clock, which keeps it pure and replayable.

use serde::{Deserialize, Serialize};

/// A held-key intent the input adapter can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Shoot,
}

/// External stimulus for [`reduce`](super::reduce)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Begin a run (from the title or game-over screen)
    StartGame,
    /// Running -> Paused; no-op elsewhere
    PauseGame,
    /// Paused -> Running; no-op elsewhere
    ResumeGame,
    /// Abandon the run and return to the title screen
    StopGame,
    KeyDown(Key),
    KeyUp(Key),
    /// Absolute drag positioning; x is clamped into the playfield
    SetPlayerPosition { x: f32 },
    /// One cooldown-gated shot from a screen tap
    TapShoot { now_ms: f64 },
    /// One simulation step. `delta_ms` is the frame gap as reported by
    /// the scheduler; movement is fixed-step per tick and does not
    /// scale by it, only wall-clock effects read `now_ms`.
    Tick { now_ms: f64, delta_ms: f64 },
    /// Dismiss the current transient message
    ClearMessage,
}
