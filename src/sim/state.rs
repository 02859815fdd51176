//! Game state and core simulation types
//!
//! Everything the renderer needs to draw a frame lives here, and all of
//! it is serializable so snapshots can be shipped across a boundary or
//! replayed in tests.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulating
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen mid-run; ticks are not delivered and timers stand still
    Paused,
    /// Run ended, final score still on display
    GameOver,
}

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Player,
    Enemy,
    Bullet,
    Star,
    PowerUp,
    ShieldPowerUp,
}

/// Display color for an entity, resolved to a hex string by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    White,
    Cyan,
    Pink,
    Green,
    Lime,
}

impl Tint {
    pub fn hex(&self) -> &'static str {
        match self {
            Tint::White => "#FFFFFF",
            Tint::Cyan => "#61DCFF",
            Tint::Pink => "#FF61DC",
            Tint::Green => "#61FF8D",
            Tint::Lime => "#DCFF61",
        }
    }
}

/// A moving rectangle in the shared 0-100 coordinate space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Unique within the state, allocated from a monotonic counter
    pub id: u32,
    pub kind: ObjectKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal travel direction (+1/-1) for wall-bouncing enemies
    pub direction: Option<f32>,
    /// Per-entity fall/travel speed in units per tick
    pub speed: Option<f32>,
    pub tint: Option<Tint>,
}

impl GameObject {
    /// The player ship at its starting position
    pub fn player(id: u32) -> Self {
        Self {
            id,
            kind: ObjectKind::Player,
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            direction: None,
            speed: None,
            tint: Some(Tint::Cyan),
        }
    }

    pub fn bullet(id: u32, x: f32, y: f32, tint: Tint) -> Self {
        Self {
            id,
            kind: ObjectKind::Bullet,
            pos: Vec2::new(x, y),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            direction: None,
            speed: None,
            tint: Some(tint),
        }
    }
}

/// Transient in-game announcement, toast-style
///
/// `id` gives the consumer a stable key even when consecutive messages
/// carry identical text. `expires_at_ms` is set for messages raised
/// during a tick (which has a clock); boundary actions leave it `None`
/// and rely on `Action::ClearMessage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u32,
    pub text: String,
    pub expires_at_ms: Option<f64>,
}

/// Held-key intent flags, sampled by the tick engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyIntents {
    pub move_left: bool,
    pub move_right: bool,
    pub shoot: bool,
}

/// Star field parameters (sizes and speeds are per-axis/per-star random)
const STAR_SIZE_MIN: f32 = 0.5;
const STAR_SIZE_MAX: f32 = 1.5;
const STAR_SPEED_MIN: f32 = 0.01;
const STAR_SPEED_MAX: f32 = 0.06;

/// Complete game state (deterministic, serializable)
///
/// Exclusively owned by the reducer: callers read snapshots and
/// dispatch actions, never mutate fields directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// 1..=MAX_LEVEL, monotone within a run
    pub level: u32,
    pub lives: u32,
    /// Best score across runs; the only field that survives a reset
    pub high_score: u32,
    /// Triple-shot expiry (absolute wall-clock ms); `None` = inactive
    pub power_up_until: Option<f64>,
    /// Shield expiry (absolute wall-clock ms); `None` = inactive
    pub shield_until: Option<f64>,
    pub player: GameObject,
    pub bullets: Vec<GameObject>,
    pub enemies: Vec<GameObject>,
    pub power_ups: Vec<GameObject>,
    /// Always exactly STAR_COUNT entries; stars recycle, never despawn
    pub stars: Vec<GameObject>,
    pub message: Option<Message>,
    pub keys: KeyIntents,
    /// Wall-clock ms of the last shot, shared by tap and held-fire cooldowns
    pub last_shot_ms: f64,
    /// Simulation RNG, serialized with the state for deterministic replays
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh, not-started state carrying over a persisted high score.
    pub fn new(high_score: u32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut next_id = 0;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let player = GameObject::player(alloc());
        let stars = (0..STAR_COUNT).map(|_| random_star(alloc(), &mut rng)).collect();

        Self {
            seed,
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            lives: START_LIVES,
            high_score,
            power_up_until: None,
            shield_until: None,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            stars,
            message: None,
            keys: KeyIntents::default(),
            last_shot_ms: 0.0,
            rng,
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn power_up_active(&self, now_ms: f64) -> bool {
        self.power_up_until.is_some_and(|t| now_ms < t)
    }

    pub fn shield_active(&self, now_ms: f64) -> bool {
        self.shield_until.is_some_and(|t| now_ms < t)
    }

    /// Reset all run-scoped fields and enter Running.
    ///
    /// The star field and high score are carried over; everything else
    /// matches a fresh state. One enemy spawns immediately so the run
    /// opens with something to shoot at.
    pub fn reset_run(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.level = 1;
        self.lives = START_LIVES;
        self.power_up_until = None;
        self.shield_until = None;
        self.player = GameObject::player(self.player.id);
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.message = None;
        self.last_shot_ms = 0.0;
        self.phase = GamePhase::Running;
        self.spawn_enemy(tuning);
    }

    /// Fold the current score into the high score. Returns true if it rose.
    pub fn fold_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Spawn one enemy at the top of the playfield.
    pub fn spawn_enemy(&mut self, tuning: &Tuning) {
        let id = self.next_entity_id();
        let x = self.rng.random_range(0.0..SPAWN_MAX_X);
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let speed = self.rng.random_range(0.0..tuning.enemy_speed_span)
            + tuning.enemy_speed_base
            + self.level as f32 * tuning.enemy_speed_per_level;
        self.enemies.push(GameObject {
            id,
            kind: ObjectKind::Enemy,
            pos: Vec2::new(x, 0.0),
            size: Vec2::splat(ENEMY_SIZE),
            direction: Some(direction),
            speed: Some(speed),
            tint: Some(Tint::Pink),
        });
    }

    /// Spawn a falling capsule (`PowerUp` or `ShieldPowerUp`).
    pub fn spawn_capsule(&mut self, kind: ObjectKind, tuning: &Tuning) {
        let id = self.next_entity_id();
        let x = self.rng.random_range(0.0..SPAWN_MAX_X);
        let tint = match kind {
            ObjectKind::ShieldPowerUp => Tint::Lime,
            _ => Tint::Green,
        };
        self.power_ups.push(GameObject {
            id,
            kind,
            pos: Vec2::new(x, 0.0),
            size: Vec2::splat(POWER_UP_SIZE),
            direction: None,
            speed: Some(tuning.power_up_speed),
            tint: Some(tint),
        });
    }

    /// Spawn bullet(s) from the player and stamp the cooldown clock.
    ///
    /// One white shot normally; a cyan/pink three-way spread while the
    /// triple-shot power-up is active. Cooldown gating is the caller's
    /// job - this only fires.
    pub fn fire_bullets(&mut self, now_ms: f64) {
        let center_x = self.player.pos.x + self.player.size.x / 2.0 - BULLET_WIDTH / 2.0;
        let y = self.player.pos.y;
        if self.power_up_active(now_ms) {
            for (dx, dy, tint) in [
                (0.0, -3.0, Tint::Cyan),
                (-2.0, -2.0, Tint::Pink),
                (2.0, -2.0, Tint::Pink),
            ] {
                let id = self.next_entity_id();
                self.bullets.push(GameObject::bullet(id, center_x + dx, y + dy, tint));
            }
        } else {
            let id = self.next_entity_id();
            self.bullets.push(GameObject::bullet(id, center_x, y - 3.0, Tint::White));
        }
        self.last_shot_ms = now_ms;
    }

    /// Raise a transient message, replacing any current one.
    pub fn push_message(&mut self, text: impl Into<String>, expires_at_ms: Option<f64>) {
        let id = self.next_entity_id();
        self.message = Some(Message {
            id,
            text: text.into(),
            expires_at_ms,
        });
    }
}

/// One background star with random position, size, speed, and palette color.
fn random_star(id: u32, rng: &mut Pcg32) -> GameObject {
    // Weighted palette: ~30% cyan, ~35% pink, ~35% white
    let tint = if rng.random::<f32>() > 0.7 {
        Tint::Cyan
    } else if rng.random::<f32>() > 0.5 {
        Tint::Pink
    } else {
        Tint::White
    };
    GameObject {
        id,
        kind: ObjectKind::Star,
        pos: Vec2::new(
            rng.random_range(0.0..GAME_WIDTH),
            rng.random_range(0.0..GAME_HEIGHT),
        ),
        size: Vec2::new(
            rng.random_range(STAR_SIZE_MIN..STAR_SIZE_MAX),
            rng.random_range(STAR_SIZE_MIN..STAR_SIZE_MAX),
        ),
        direction: None,
        speed: Some(rng.random_range(STAR_SPEED_MIN..STAR_SPEED_MAX)),
        tint: Some(tint),
    }
}
