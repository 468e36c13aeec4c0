//! Input intents and device mappings

use crate::sim::TickInput;

/// What the player asked for, independent of device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Jump,
    TogglePause,
    Restart,
}

impl Intent {
    /// Fold this intent into the next frame's input
    pub fn apply(self, input: &mut TickInput) {
        match self {
            Intent::MoveLeft => input.move_left = true,
            Intent::MoveRight => input.move_right = true,
            Intent::Jump => input.jump = true,
            // Two toggles in one frame cancel out
            Intent::TogglePause => input.pause = !input.pause,
            Intent::Restart => input.restart = true,
        }
    }
}

/// Map a key name (DOM `KeyboardEvent.key` spelling) to an intent.
/// Space restarts after a game over and jumps otherwise.
pub fn intent_for_key(key: &str, game_over: bool) -> Option<Intent> {
    match key {
        " " if game_over => Some(Intent::Restart),
        "ArrowLeft" | "a" | "A" => Some(Intent::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(Intent::MoveRight),
        "ArrowUp" | "w" | "W" | " " => Some(Intent::Jump),
        "Escape" | "p" | "P" => Some(Intent::TogglePause),
        _ => None,
    }
}

/// Longest press that still counts as a tap
const TAP_MAX_MS: f64 = 200.0;
/// Largest drift that still counts as a tap
const TAP_MAX_DRIFT: f32 = 10.0;
/// Shortest drag that counts as a swipe
const SWIPE_MIN_DISTANCE: f32 = 30.0;

/// A completed touch, start to end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub dx: f32,
    pub dy: f32,
    pub duration_ms: f64,
}

impl Swipe {
    pub fn new(start: (f32, f32), end: (f32, f32), duration_ms: f64) -> Self {
        Self {
            dx: end.0 - start.0,
            dy: end.1 - start.1,
            duration_ms,
        }
    }

    /// Quick tap jumps, horizontal swipes change lane, upward swipes jump
    pub fn intent(&self) -> Option<Intent> {
        if self.duration_ms < TAP_MAX_MS
            && self.dx.abs() < TAP_MAX_DRIFT
            && self.dy.abs() < TAP_MAX_DRIFT
        {
            return Some(Intent::Jump);
        }

        if self.dx.abs() > self.dy.abs() {
            if self.dx > SWIPE_MIN_DISTANCE {
                Some(Intent::MoveRight)
            } else if self.dx < -SWIPE_MIN_DISTANCE {
                Some(Intent::MoveLeft)
            } else {
                None
            }
        } else if self.dy < -SWIPE_MIN_DISTANCE {
            Some(Intent::Jump)
        } else {
            None
        }
    }
}
