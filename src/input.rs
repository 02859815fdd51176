//! Input adapter: raw events to actions
//!
//! The simulation only understands [`Action`]s; this module owns the
//! translation from keyboard codes and touch gestures. UI buttons need
//! no translation - they dispatch `StartGame`/`PauseGame`/etc directly.

use crate::sim::{Action, Key};

/// A press-and-release shorter than this is a tap
pub const TAP_MAX_MS: f64 = 250.0;
/// Lateral travel beyond this turns a touch into a drag
pub const TAP_MAX_TRAVEL: f32 = 10.0;

/// Map a keyboard event code to a held-key intent.
pub fn key_from_code(code: &str) -> Option<Key> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Key::MoveLeft),
        "ArrowRight" | "KeyD" => Some(Key::MoveRight),
        "Space" => Some(Key::Shoot),
        _ => None,
    }
}

/// Classifies touch sequences on the play surface.
///
/// A short press with little lateral movement becomes a `TapShoot`; once
/// the finger travels past the drag threshold every further move emits
/// an absolute `SetPlayerPosition` centered under the touch point.
/// Coordinates are in the normalized 0-100 playfield space.
#[derive(Debug, Default)]
pub struct TouchTracker {
    start: Option<(f32, f64)>,
    dragging: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finger down. No action yet - classification needs movement or release.
    pub fn touch_start(&mut self, x: f32, now_ms: f64) {
        self.start = Some((x, now_ms));
        self.dragging = false;
    }

    /// Finger moved. Emits positioning once the gesture is a drag.
    pub fn touch_move(&mut self, x: f32, player_width: f32) -> Option<Action> {
        let (start_x, _) = self.start?;
        if !self.dragging && (x - start_x).abs() < TAP_MAX_TRAVEL {
            return None;
        }
        self.dragging = true;
        Some(Action::SetPlayerPosition { x: x - player_width / 2.0 })
    }

    /// Finger up. A quick, stationary touch fires.
    pub fn touch_end(&mut self, now_ms: f64) -> Option<Action> {
        let (_, start_ms) = self.start.take()?;
        let was_drag = std::mem::replace(&mut self.dragging, false);
        if !was_drag && now_ms - start_ms < TAP_MAX_MS {
            Some(Action::TapShoot { now_ms })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_code("ArrowLeft"), Some(Key::MoveLeft));
        assert_eq!(key_from_code("KeyA"), Some(Key::MoveLeft));
        assert_eq!(key_from_code("ArrowRight"), Some(Key::MoveRight));
        assert_eq!(key_from_code("KeyD"), Some(Key::MoveRight));
        assert_eq!(key_from_code("Space"), Some(Key::Shoot));
        assert_eq!(key_from_code("Escape"), None);
    }

    #[test]
    fn test_quick_touch_is_a_tap() {
        let mut tracker = TouchTracker::new();
        tracker.touch_start(50.0, 1_000.0);
        assert_eq!(tracker.touch_move(52.0, 6.0), None);
        assert_eq!(
            tracker.touch_end(1_100.0),
            Some(Action::TapShoot { now_ms: 1_100.0 })
        );
    }

    #[test]
    fn test_slow_touch_is_not_a_tap() {
        let mut tracker = TouchTracker::new();
        tracker.touch_start(50.0, 1_000.0);
        assert_eq!(tracker.touch_end(1_400.0), None);
    }

    #[test]
    fn test_lateral_travel_becomes_a_drag() {
        let mut tracker = TouchTracker::new();
        tracker.touch_start(50.0, 1_000.0);
        assert_eq!(
            tracker.touch_move(65.0, 6.0),
            Some(Action::SetPlayerPosition { x: 62.0 })
        );
        // Once dragging, even small moves keep positioning
        assert_eq!(
            tracker.touch_move(66.0, 6.0),
            Some(Action::SetPlayerPosition { x: 63.0 })
        );
        // And release never fires
        assert_eq!(tracker.touch_end(1_050.0), None);
    }

    #[test]
    fn test_release_without_start_is_ignored() {
        let mut tracker = TouchTracker::new();
        assert_eq!(tracker.touch_end(1_000.0), None);
    }
}
