//! Per-frame simulation update
//!
//! One call advances the world by one discrete step, in a fixed order:
//! player movement, entity advance, timed-effect expiry, held-fire,
//! stochastic spawning, collision sweeps, level-up check. Movement is a
//! fixed distance per tick (the frame scheduler is assumed to run at a
//! roughly constant rate); cooldowns and effect expiries compare
//! against the wall-clock `now_ms` instead, so they are frame-rate
//! independent.

use rand::Rng;

use super::collision::overlaps;
use super::state::{GameObject, GamePhase, GameState, ObjectKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Advance a Running state by one step. Callers gate on phase.
pub fn run(state: &mut GameState, now_ms: f64, tuning: &Tuning) {
    move_player(state, tuning);
    advance_entities(state, tuning);
    expire_timers(state, now_ms, tuning);
    auto_fire(state, now_ms, tuning);
    spawn_entities(state, tuning);
    if resolve_collisions(state, now_ms, tuning) {
        // Lives hit zero; the rest of the tick is dead weight
        return;
    }
    check_level_up(state, now_ms, tuning);
}

/// Step the player by the held-movement intents and clamp into bounds.
fn move_player(state: &mut GameState, tuning: &Tuning) {
    let max_x = GAME_WIDTH - state.player.size.x;
    if state.keys.move_left && state.player.pos.x > 0.0 {
        state.player.pos.x -= tuning.player_step;
    }
    if state.keys.move_right && state.player.pos.x < max_x {
        state.player.pos.x += tuning.player_step;
    }
    state.player.pos.x = state.player.pos.x.clamp(0.0, max_x);
}

/// Move bullets, enemies, power-ups, and stars; drop what left the field.
fn advance_entities(state: &mut GameState, tuning: &Tuning) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= tuning.bullet_speed;
    }
    state.bullets.retain(|b| b.pos.y > BULLET_DESPAWN_Y);

    for enemy in &mut state.enemies {
        let dir = enemy.direction.unwrap_or(1.0);
        let speed = enemy.speed.unwrap_or(tuning.enemy_speed_base);
        let mut nx = enemy.pos.x + dir * speed;
        if nx <= 0.0 || nx >= ENEMY_MAX_X {
            enemy.direction = Some(-dir);
            nx = nx.clamp(0.0, ENEMY_MAX_X);
        }
        enemy.pos.x = nx;
        enemy.pos.y += tuning.enemy_drift;
    }
    // Reaching the bottom counts as escaped, no penalty
    state.enemies.retain(|e| e.pos.y < GAME_HEIGHT);

    for capsule in &mut state.power_ups {
        capsule.pos.y += capsule.speed.unwrap_or(tuning.power_up_speed);
    }
    state.power_ups.retain(|p| p.pos.y < GAME_HEIGHT);

    // Stars recycle: past the bottom they restart at the top with a
    // fresh random x. Indexed loop because the wrap draws from the RNG.
    for i in 0..state.stars.len() {
        let speed = state.stars[i].speed.unwrap_or(STAR_FALLBACK_SPEED);
        let ny = state.stars[i].pos.y + speed;
        if ny >= GAME_HEIGHT {
            let nx = state.rng.random_range(0.0..GAME_WIDTH);
            let star = &mut state.stars[i];
            star.pos.y = 0.0;
            star.pos.x = nx;
        } else {
            state.stars[i].pos.y = ny;
        }
    }
}

const STAR_FALLBACK_SPEED: f32 = 0.03;

/// Deactivate timed effects whose expiry passed, and expired messages.
fn expire_timers(state: &mut GameState, now_ms: f64, tuning: &Tuning) {
    if state.power_up_until.is_some_and(|t| now_ms >= t) {
        state.power_up_until = None;
        state.push_message("Triple shot faded", Some(now_ms + tuning.message_duration_ms));
    }
    if state.shield_until.is_some_and(|t| now_ms >= t) {
        state.shield_until = None;
        state.push_message("Shield faded", Some(now_ms + tuning.message_duration_ms));
    }
    if let Some(msg) = &state.message {
        if msg.expires_at_ms.is_some_and(|t| now_ms >= t) {
            state.message = None;
        }
    }
}

/// Fire while the shoot intent is held and the cooldown has elapsed.
fn auto_fire(state: &mut GameState, now_ms: f64, tuning: &Tuning) {
    if !state.keys.shoot {
        return;
    }
    let cooldown = if state.power_up_active(now_ms) {
        tuning.powered_cooldown_ms
    } else {
        tuning.shot_cooldown_ms
    };
    if now_ms - state.last_shot_ms >= cooldown {
        state.fire_bullets(now_ms);
    }
}

/// Stochastic spawning: enemy population trends toward the level cap,
/// capsules appear rarely and only while their effect is down.
fn spawn_entities(state: &mut GameState, tuning: &Tuning) {
    let enemy_cap = tuning.enemies_per_level * state.level;
    if (state.enemies.len() as u32) < enemy_cap && roll(state, tuning.enemy_spawn_chance) {
        state.spawn_enemy(tuning);
    }
    if state.power_up_until.is_none() && roll(state, tuning.power_up_chance) {
        state.spawn_capsule(ObjectKind::PowerUp, tuning);
    }
    if state.shield_until.is_none() && roll(state, tuning.shield_chance) {
        state.spawn_capsule(ObjectKind::ShieldPowerUp, tuning);
    }
}

/// Bernoulli draw; tuning values outside [0,1] are clamped, not trusted.
fn roll(state: &mut GameState, chance: f64) -> bool {
    state.rng.random_bool(chance.clamp(0.0, 1.0))
}

/// The three AABB sweeps. Returns true when the run ended (lives at 0),
/// in which case the remaining tick work must be skipped.
fn resolve_collisions(state: &mut GameState, now_ms: f64, tuning: &Tuning) -> bool {
    let kills = sweep_bullets(&mut state.bullets, &mut state.enemies);
    state.score += kills * tuning.score_per_kill;

    if sweep_player_enemies(state, now_ms, tuning) {
        return true;
    }
    sweep_player_capsules(state, now_ms, tuning);
    false
}

/// bullet x enemy: each overlapping pair removes both. A bullet kills at
/// most one enemy per tick.
fn sweep_bullets(bullets: &mut Vec<GameObject>, enemies: &mut Vec<GameObject>) -> u32 {
    let mut kills = 0;
    let mut dead = vec![false; enemies.len()];
    bullets.retain(|bullet| {
        for (j, enemy) in enemies.iter().enumerate() {
            if !dead[j] && overlaps(bullet, enemy) {
                dead[j] = true;
                kills += 1;
                return false;
            }
        }
        true
    });
    let mut keep = dead.iter().map(|d| !d);
    enemies.retain(|_| keep.next().unwrap_or(true));
    kills
}

/// player x enemy: the enemy is always consumed; an active shield blocks
/// the hit, otherwise a life is lost. Returns true on game over.
fn sweep_player_enemies(state: &mut GameState, now_ms: f64, tuning: &Tuning) -> bool {
    let mut i = 0;
    while i < state.enemies.len() {
        if !overlaps(&state.player, &state.enemies[i]) {
            i += 1;
            continue;
        }
        state.enemies.remove(i);
        if state.shield_active(now_ms) {
            state.shield_until = None;
            state.push_message("Shield blocked the hit!", Some(now_ms + tuning.message_duration_ms));
            continue;
        }
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            game_over(state, now_ms, tuning);
            return true;
        }
        state.push_message(
            format!("Hit! Lives: {}", state.lives),
            Some(now_ms + tuning.message_duration_ms),
        );
    }
    false
}

/// player x capsule: collecting activates the matching timed effect;
/// a message is raised only on the rising edge.
fn sweep_player_capsules(state: &mut GameState, now_ms: f64, tuning: &Tuning) {
    let mut i = 0;
    while i < state.power_ups.len() {
        if !overlaps(&state.player, &state.power_ups[i]) {
            i += 1;
            continue;
        }
        let kind = state.power_ups[i].kind;
        state.power_ups.remove(i);
        match kind {
            ObjectKind::PowerUp => {
                let rising = !state.power_up_active(now_ms);
                state.power_up_until = Some(now_ms + tuning.effect_duration_ms);
                if rising {
                    state.push_message(
                        "Power-Up! Triple shot activated!",
                        Some(now_ms + tuning.message_duration_ms),
                    );
                }
            }
            ObjectKind::ShieldPowerUp => {
                let rising = !state.shield_active(now_ms);
                state.shield_until = Some(now_ms + tuning.effect_duration_ms);
                if rising {
                    state.push_message("Shield up!", Some(now_ms + tuning.message_duration_ms));
                }
            }
            _ => {}
        }
    }
}

/// End the run: fold the high score and freeze into GameOver.
fn game_over(state: &mut GameState, now_ms: f64, tuning: &Tuning) {
    let new_high = state.fold_high_score();
    state.phase = GamePhase::GameOver;
    log::info!("game over at score {} (level {})", state.score, state.level);
    if new_high {
        state.push_message(
            format!("New High Score: {}!", state.high_score),
            Some(now_ms + tuning.message_duration_ms),
        );
    }
}

/// Advance one level when the score crosses the current threshold.
/// Checked once per tick against the pre-increment level, so even a
/// large score jump raises at most one level.
fn check_level_up(state: &mut GameState, now_ms: f64, tuning: &Tuning) {
    if state.level < MAX_LEVEL && state.score >= state.level * tuning.level_score_step {
        state.level += 1;
        log::info!("level up: {}", state.level);
        state.push_message(
            format!("Level Up: {}!", state.level),
            Some(now_ms + tuning.message_duration_ms),
        );
    }
}
