//! The runner
//!
//! Lane changes are logical and immediate while the sprite eases across.
//! Jumps are single-axis kinematics integrated once per frame, with a short
//! frame-counted buffer so an input pressed just before landing still fires.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Logical lane, always in `0..lanes`
    pub lane: usize,
    lanes: usize,
    /// Top-left of the sprite
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// `pos.y` while standing
    pub ground_y: f32,
    pub vel_y: f32,
    pub jumping: bool,
    /// Frame at which a not-yet-honoured jump was requested
    pub jump_request: Option<u64>,
}

impl Player {
    /// Standing in the start lane, centered in its slot
    pub fn new(tuning: &Tuning) -> Self {
        let ground_y = tuning.player_ground_y();
        Self {
            lane: tuning.start_lane,
            lanes: tuning.lanes,
            pos: Vec2::new(tuning.lane_slot_x(tuning.start_lane), ground_y),
            width: tuning.player_width,
            height: tuning.player_height,
            ground_y,
            vel_y: 0.0,
            jumping: false,
            jump_request: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        !self.jumping
    }

    pub fn move_left(&mut self) {
        self.lane = self.lane.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.lane + 1 < self.lanes {
            self.lane += 1;
        }
    }

    /// Ask for a jump at `frame`. Returns true if it fired right away;
    /// otherwise the request is held for [`Player::advance`].
    pub fn request_jump(&mut self, frame: u64, tuning: &Tuning) -> bool {
        if self.is_grounded() {
            self.jump_request = None;
            self.launch(tuning);
            return true;
        }
        self.jump_request = Some(frame);
        false
    }

    /// Advance one frame. Returns true if a buffered jump fired.
    pub fn advance(&mut self, frame: u64, tuning: &Tuning) -> bool {
        // Ease toward the lane slot
        let target_x = tuning.lane_slot_x(self.lane);
        self.pos.x += (target_x - self.pos.x) * tuning.lane_ease;

        // Buffered jump
        let mut jumped = false;
        if let Some(requested_at) = self.jump_request {
            if !self.request_live(requested_at, frame, tuning) {
                self.jump_request = None;
            } else if self.is_grounded() {
                self.jump_request = None;
                self.launch(tuning);
                jumped = true;
            }
        }

        // Vertical kinematics
        if self.jumping {
            self.pos.y += self.vel_y;
            self.vel_y += tuning.gravity;

            if self.pos.y >= self.ground_y {
                self.land();
            }
        }

        jumped
    }

    fn launch(&mut self, tuning: &Tuning) {
        self.jumping = true;
        self.vel_y = tuning.jump_velocity;
    }

    /// Clamp to the ground. A held request is left for the next `advance`,
    /// whose single expiry check decides whether it fires.
    fn land(&mut self) {
        self.pos.y = self.ground_y;
        self.jumping = false;
        self.vel_y = 0.0;
    }

    #[inline]
    fn request_live(&self, requested_at: u64, frame: u64, tuning: &Tuning) -> bool {
        frame.saturating_sub(requested_at) < tuning.jump_buffer_frames
    }
}
