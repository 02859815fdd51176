//! Data-driven game balance
//!
//! Every knob that shapes difficulty or feel lives here rather than in
//! the transition logic, so a build (or a stored override) can rebalance
//! the game without touching the simulation.

use serde::{Deserialize, Serialize};

/// Balance knobs consumed by the reducer and tick engine.
///
/// Distances are playfield units per tick; durations and cooldowns are
/// wall-clock milliseconds; chances are per-tick Bernoulli probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement per tick while a direction is held
    pub player_step: f32,
    /// Bullet climb per tick
    pub bullet_speed: f32,
    /// Enemy downward drift per tick
    pub enemy_drift: f32,
    /// Enemy horizontal speed: base + uniform(0, span) + level scaling
    pub enemy_speed_base: f32,
    pub enemy_speed_span: f32,
    pub enemy_speed_per_level: f32,
    /// Per-tick enemy spawn chance while under the population cap
    pub enemy_spawn_chance: f64,
    /// On-screen enemy population cap is this times the current level
    pub enemies_per_level: u32,
    /// Capsule fall speed per tick
    pub power_up_speed: f32,
    /// Per-tick capsule spawn chances, gated on the effect being down
    pub power_up_chance: f64,
    pub shield_chance: f64,
    /// How long a collected effect lasts
    pub effect_duration_ms: f64,
    /// Shot cooldowns (held fire and taps share one clock)
    pub shot_cooldown_ms: f64,
    pub powered_cooldown_ms: f64,
    /// Points per destroyed enemy
    pub score_per_kill: u32,
    /// Level N is cleared at N times this score
    pub level_score_step: u32,
    /// How long transient messages stay up
    pub message_duration_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_step: 0.5,
            bullet_speed: 0.8,
            enemy_drift: 0.1,
            enemy_speed_base: 0.05,
            enemy_speed_span: 0.1,
            enemy_speed_per_level: 0.01,
            enemy_spawn_chance: 0.02,
            enemies_per_level: 2,
            power_up_speed: 0.1,
            power_up_chance: 0.001,
            shield_chance: 0.0005,
            effect_duration_ms: 10_000.0,
            shot_cooldown_ms: 300.0,
            powered_cooldown_ms: 150.0,
            score_per_kill: 10,
            level_score_step: 100,
            message_duration_ms: 2_000.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pixel-invaders-tuning";

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning override from LocalStorage");
                    return tuning;
                }
            }
        }

        Self::default()
    }

    /// Save the tuning override to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
