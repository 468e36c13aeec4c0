//! Demo-mode autopilot
//!
//! Lanes never dodge anything (obstacles sweep across every lane's x), so
//! the autopilot only has to time its jumps: leave the ground a few frames
//! before the nearest obstacle reaches the player.

use super::state::GameState;

/// How many frames of scroll ahead of contact to take off
const LEAD_FRAMES: f32 = 3.0;

/// Whether the autopilot would jump this frame
pub fn wants_jump(state: &GameState) -> bool {
    if state.player.jumping {
        return false;
    }

    let player = state.player.bounds();
    let lead = state.speed * LEAD_FRAMES;

    state.obstacles.iter().any(|o| {
        let gap = o.pos.x - player.max.x;
        let passed = o.pos.x + o.width <= player.min.x;
        !passed && gap <= lead
    })
}
