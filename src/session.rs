//! Session plumbing around the pure simulation
//!
//! `GameSession` owns the authoritative state, receives actions from
//! the input adapter and UI, and is the endpoint for the host's frame
//! scheduler. It is also the persistence boundary: the reducer only
//! raises `high_score` inside the state, and the session notices the
//! rise after a dispatch and writes it through the store. A failed
//! write is logged and the in-memory value stays authoritative.

use crate::highscores::HighScoreStore;
use crate::sim::{Action, GameState, reduce};
use crate::tuning::Tuning;

pub struct GameSession<S: HighScoreStore> {
    state: GameState,
    store: S,
    tuning: Tuning,
    /// Timestamp of the previous frame callback; `None` while disarmed
    last_frame_ms: Option<f64>,
}

impl<S: HighScoreStore> GameSession<S> {
    pub fn new(store: S, seed: u64) -> Self {
        Self::with_tuning(store, seed, Tuning::default())
    }

    pub fn with_tuning(store: S, seed: u64, tuning: Tuning) -> Self {
        let high_score = store.read();
        Self {
            state: GameState::new(high_score, seed),
            store,
            tuning,
            last_frame_ms: None,
        }
    }

    /// Latest immutable snapshot for rendering.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Apply one action and persist the high score if it rose.
    pub fn dispatch(&mut self, action: &Action) {
        let prev_high = self.state.high_score;
        self.state = reduce(&self.state, action, &self.tuning);
        if self.state.high_score > prev_high {
            if let Err(err) = self.store.write(self.state.high_score) {
                log::warn!("high score {} not persisted: {err}", self.state.high_score);
            }
        }
    }

    /// Frame-scheduler callback. The first call after (re)arming only
    /// records the clock; later calls dispatch a tick with the measured
    /// frame gap.
    pub fn frame(&mut self, now_ms: f64) {
        let Some(last) = self.last_frame_ms else {
            self.last_frame_ms = Some(now_ms);
            return;
        };
        self.last_frame_ms = Some(now_ms);
        let delta_ms = (now_ms - last).max(0.0);
        self.dispatch(&Action::Tick { now_ms, delta_ms });
    }

    /// Forget the frame clock (on pause, game over, or teardown) so
    /// re-arming later does not report a giant frame gap.
    pub fn disarm(&mut self) {
        self.last_frame_ms = None;
    }
}
