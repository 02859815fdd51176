//! The transition function
//!
//! `reduce` is total and pure: every action is handled, nothing panics,
//! and the input state is never mutated. Side effects (persisting the
//! high score) belong to the caller, which watches `high_score` rise
//! across a dispatch - see [`crate::session::GameSession`].

use super::action::{Action, Key};
use super::state::{GamePhase, GameState};
use super::tick;
use crate::consts::GAME_WIDTH;
use crate::tuning::Tuning;

/// Apply one action to a state snapshot, producing the next snapshot.
pub fn reduce(state: &GameState, action: &Action, tuning: &Tuning) -> GameState {
    let mut next = state.clone();
    match action {
        Action::StartGame => match next.phase {
            GamePhase::NotStarted | GamePhase::GameOver => {
                next.reset_run(tuning);
                log::info!("run started (seed {})", next.seed);
            }
            _ => {}
        },

        Action::PauseGame => {
            if next.phase == GamePhase::Running {
                next.phase = GamePhase::Paused;
            }
        }

        Action::ResumeGame => {
            if next.phase == GamePhase::Paused {
                next.phase = GamePhase::Running;
            }
        }

        Action::StopGame => match next.phase {
            GamePhase::Running | GamePhase::Paused => {
                let new_high = next.fold_high_score();
                next.bullets.clear();
                next.enemies.clear();
                next.power_ups.clear();
                next.power_up_until = None;
                next.shield_until = None;
                next.phase = GamePhase::NotStarted;
                next.push_message(format!("Game Stopped. Final score: {}", next.score), None);
                log::info!(
                    "run stopped at score {}{}",
                    next.score,
                    if new_high { " (new high score)" } else { "" }
                );
            }
            _ => {}
        },

        Action::KeyDown(key) => set_intent(&mut next, *key, true),
        Action::KeyUp(key) => set_intent(&mut next, *key, false),

        Action::SetPlayerPosition { x } => {
            if x.is_finite() {
                let max_x = GAME_WIDTH - next.player.size.x;
                next.player.pos.x = x.clamp(0.0, max_x);
            }
        }

        Action::TapShoot { now_ms } => {
            if next.phase == GamePhase::Running {
                let cooldown = if next.power_up_active(*now_ms) {
                    tuning.powered_cooldown_ms
                } else {
                    tuning.shot_cooldown_ms
                };
                if now_ms - next.last_shot_ms >= cooldown {
                    next.fire_bullets(*now_ms);
                }
            }
        }

        Action::Tick { now_ms, .. } => {
            if next.phase == GamePhase::Running {
                tick::run(&mut next, *now_ms, tuning);
            }
        }

        Action::ClearMessage => next.message = None,
    }
    next
}

fn set_intent(state: &mut GameState, key: Key, held: bool) {
    match key {
        Key::MoveLeft => state.keys.move_left = held,
        Key::MoveRight => state.keys.move_right = held,
        Key::Shoot => state.keys.shoot = held,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    fn start(state: GameState) -> GameState {
        reduce(&state, &Action::StartGame, &tuning())
    }

    #[test]
    fn test_phase_machine_happy_path() {
        let t = tuning();
        let s0 = GameState::new(0, 1);
        assert_eq!(s0.phase, GamePhase::NotStarted);

        let s1 = start(s0);
        assert_eq!(s1.phase, GamePhase::Running);

        let s2 = reduce(&s1, &Action::PauseGame, &t);
        assert_eq!(s2.phase, GamePhase::Paused);

        let s3 = reduce(&s2, &Action::ResumeGame, &t);
        assert_eq!(s3.phase, GamePhase::Running);

        let s4 = reduce(&s3, &Action::StopGame, &t);
        assert_eq!(s4.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let t = tuning();
        let running = start(GameState::new(0, 1));
        let once = reduce(&running, &Action::PauseGame, &t);
        let twice = reduce(&once, &Action::PauseGame, &t);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pause_outside_running_is_a_no_op() {
        let t = tuning();
        let fresh = GameState::new(0, 1);
        assert_eq!(reduce(&fresh, &Action::PauseGame, &t), fresh);
        assert_eq!(reduce(&fresh, &Action::ResumeGame, &t), fresh);
        assert_eq!(reduce(&fresh, &Action::StopGame, &t), fresh);
    }

    #[test]
    fn test_paused_tick_is_frozen() {
        let t = tuning();
        let running = start(GameState::new(0, 1));
        let paused = reduce(&running, &Action::PauseGame, &t);
        let ticked = reduce(
            &paused,
            &Action::Tick { now_ms: 1_000_000.0, delta_ms: 16.0 },
            &t,
        );
        assert_eq!(paused, ticked);
    }

    #[test]
    fn test_key_intents_do_not_advance_simulation() {
        let t = tuning();
        let running = start(GameState::new(0, 1));
        let held = reduce(&running, &Action::KeyDown(Key::MoveLeft), &t);
        assert!(held.keys.move_left);
        assert_eq!(held.player.pos.x, running.player.pos.x);
        let released = reduce(&held, &Action::KeyUp(Key::MoveLeft), &t);
        assert!(!released.keys.move_left);
    }

    #[test]
    fn test_set_player_position_clamps() {
        let t = tuning();
        let state = start(GameState::new(0, 1));
        let max_x = GAME_WIDTH - PLAYER_SIZE;

        let left = reduce(&state, &Action::SetPlayerPosition { x: -20.0 }, &t);
        assert_eq!(left.player.pos.x, 0.0);

        let right = reduce(&state, &Action::SetPlayerPosition { x: 250.0 }, &t);
        assert_eq!(right.player.pos.x, max_x);

        let nan = reduce(&state, &Action::SetPlayerPosition { x: f32::NAN }, &t);
        assert_eq!(nan.player.pos.x, state.player.pos.x);
    }

    #[test]
    fn test_tap_shoot_cooldown_gate() {
        let t = tuning();
        let running = start(GameState::new(0, 1));
        let one = reduce(&running, &Action::TapShoot { now_ms: 1_000.0 }, &t);
        assert_eq!(one.bullets.len(), 1);

        // Second tap inside the 300ms window is rejected silently
        let two = reduce(&one, &Action::TapShoot { now_ms: 1_200.0 }, &t);
        assert_eq!(two.bullets.len(), 1);

        let three = reduce(&two, &Action::TapShoot { now_ms: 1_350.0 }, &t);
        assert_eq!(three.bullets.len(), 2);
    }

    #[test]
    fn test_tap_shoot_ignored_before_start() {
        let t = tuning();
        let fresh = GameState::new(0, 1);
        let tapped = reduce(&fresh, &Action::TapShoot { now_ms: 1_000.0 }, &t);
        assert!(tapped.bullets.is_empty());
    }

    #[test]
    fn test_stop_folds_and_round_trips_to_fresh() {
        let t = tuning();
        let mut running = start(GameState::new(100, 1));
        running.score = 250;
        running.level = 3;
        running.lives = 1;
        running.power_up_until = Some(1e12);

        let stopped = reduce(&running, &Action::StopGame, &t);
        assert_eq!(stopped.phase, GamePhase::NotStarted);
        assert_eq!(stopped.high_score, 250);
        assert!(stopped.enemies.is_empty());
        assert!(stopped.message.is_some());

        // Restart matches a fresh state except the carried star field
        let restarted = reduce(&stopped, &Action::StartGame, &t);
        assert_eq!(restarted.phase, GamePhase::Running);
        assert_eq!(restarted.score, 0);
        assert_eq!(restarted.level, 1);
        assert_eq!(restarted.lives, START_LIVES);
        assert_eq!(restarted.high_score, 250);
        assert_eq!(restarted.power_up_until, None);
        assert_eq!(restarted.message, None);
        assert_eq!(restarted.stars, stopped.stars);
        assert_eq!(restarted.player.pos.x, PLAYER_START_X);
    }

    #[test]
    fn test_restart_after_game_over() {
        let t = tuning();
        let mut over = start(GameState::new(0, 1));
        over.phase = GamePhase::GameOver;
        over.lives = 0;
        over.score = 40;

        let fresh = reduce(&over, &Action::StartGame, &t);
        assert_eq!(fresh.phase, GamePhase::Running);
        assert_eq!(fresh.lives, START_LIVES);
        assert_eq!(fresh.score, 0);
    }

    #[test]
    fn test_clear_message() {
        let t = tuning();
        let running = start(GameState::new(0, 1));
        let stopped = reduce(&running, &Action::StopGame, &t);
        assert!(stopped.message.is_some());
        let cleared = reduce(&stopped, &Action::ClearMessage, &t);
        assert_eq!(cleared.message, None);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed fed the same actions stay identical
        let t = tuning();
        let mut a = GameState::new(0, 99_999);
        let mut b = GameState::new(0, 99_999);

        let script = [
            Action::StartGame,
            Action::KeyDown(Key::MoveRight),
            Action::KeyDown(Key::Shoot),
            Action::Tick { now_ms: 1_000.0, delta_ms: 16.0 },
            Action::Tick { now_ms: 1_016.0, delta_ms: 16.0 },
            Action::TapShoot { now_ms: 1_500.0 },
            Action::Tick { now_ms: 1_516.0, delta_ms: 16.0 },
        ];
        for action in &script {
            a = reduce(&a, action, &t);
            b = reduce(&b, action, &t);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_state_serde_round_trip() {
        let t = tuning();
        let mut state = start(GameState::new(7, 3));
        state = reduce(&state, &Action::Tick { now_ms: 1_000.0, delta_ms: 16.0 }, &t);

        let json = serde_json::to_string(&state).expect("serialize");
        let back: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(state, back);
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::StartGame),
            Just(Action::PauseGame),
            Just(Action::ResumeGame),
            Just(Action::StopGame),
            Just(Action::KeyDown(Key::MoveLeft)),
            Just(Action::KeyDown(Key::MoveRight)),
            Just(Action::KeyDown(Key::Shoot)),
            Just(Action::KeyUp(Key::MoveLeft)),
            Just(Action::KeyUp(Key::MoveRight)),
            Just(Action::KeyUp(Key::Shoot)),
            (-200.0f32..300.0).prop_map(|x| Action::SetPlayerPosition { x }),
            (0.0f64..600_000.0).prop_map(|now_ms| Action::TapShoot { now_ms }),
            (0.0f64..600_000.0)
                .prop_map(|now_ms| Action::Tick { now_ms, delta_ms: 16.0 }),
            Just(Action::ClearMessage),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_under_any_action_sequence(
            seed in 0u64..1_000,
            actions in proptest::collection::vec(arb_action(), 1..60),
        ) {
            let t = tuning();
            let mut state = GameState::new(0, seed);
            for action in &actions {
                state = reduce(&state, action, &t);
                prop_assert!(state.level >= 1 && state.level <= MAX_LEVEL);
                prop_assert!(state.lives <= START_LIVES);
                prop_assert_eq!(state.stars.len(), STAR_COUNT);
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= GAME_WIDTH - state.player.size.x);
                prop_assert!(state.player.pos.x.is_finite());
                if state.phase == GamePhase::GameOver {
                    prop_assert_eq!(state.lives, 0);
                    prop_assert!(state.high_score >= state.score);
                }
            }
        }
    }
}
