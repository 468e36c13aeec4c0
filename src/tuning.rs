//! Game balance values
//!
//! Defaults come from [`crate::consts`]. A `Tuning` is validated once when a
//! game is created; malformed values are a setup defect and are rejected
//! rather than clamped.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub ground_height: f32,

    pub lanes: usize,
    pub start_lane: usize,
    pub lane_ease: f32,

    pub player_width: f32,
    pub player_height: f32,

    pub jump_velocity: f32,
    pub gravity: f32,
    pub jump_buffer_frames: u64,

    pub initial_speed: f32,
    pub speed_increment: f32,

    pub coin_spawn_rate: f64,
    pub obstacle_spawn_rate: f64,
    pub special_coin_chance: f64,
    /// Skip a spawn while the same lane still has an entity this close to
    /// the right edge (0 = no spacing guarantee)
    pub min_spawn_gap: f32,

    pub coin_size: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
    pub hitbox_inset: f32,

    pub coin_value: u64,
    pub special_coin_value: u64,
    pub blessing_bonus: u64,
    pub blessing_threshold: u32,

    pub flavor_text_chance: f64,
    pub flavor_text_frames: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            lanes: LANES,
            start_lane: PLAYER_START_LANE,
            lane_ease: LANE_EASE,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            jump_buffer_frames: JUMP_BUFFER_FRAMES,

            initial_speed: GAME_SPEED_START,
            speed_increment: GAME_SPEED_INCREMENT,

            coin_spawn_rate: COIN_SPAWN_RATE,
            obstacle_spawn_rate: OBSTACLE_SPAWN_RATE,
            special_coin_chance: SPECIAL_COIN_CHANCE,
            min_spawn_gap: 0.0,

            coin_size: COIN_SIZE,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,
            hitbox_inset: HITBOX_INSET,

            coin_value: COIN_VALUE,
            special_coin_value: SPECIAL_COIN_VALUE,
            blessing_bonus: BLESSING_BONUS,
            blessing_threshold: BLESSING_COIN_THRESHOLD,

            flavor_text_chance: FLAVOR_TEXT_CHANCE,
            flavor_text_frames: FLAVOR_TEXT_FRAMES,
        }
    }
}

impl Tuning {
    /// Tuning with no random spawns or flavor text, for scripted scenarios
    pub fn quiet() -> Self {
        Self {
            coin_spawn_rate: 0.0,
            obstacle_spawn_rate: 0.0,
            flavor_text_chance: 0.0,
            ..Self::default()
        }
    }

    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value that would otherwise produce a broken simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lanes == 0 {
            return Err(ConfigError::NoLanes);
        }
        if self.start_lane >= self.lanes {
            return Err(ConfigError::StartLaneOutOfRange {
                start: self.start_lane,
                lanes: self.lanes,
            });
        }

        for (field, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("initial_speed", self.initial_speed),
            ("gravity", self.gravity),
            ("coin_size", self.coin_size),
            ("obstacle_min_height", self.obstacle_min_height),
            ("lane_ease", self.lane_ease),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("ground_height", self.ground_height),
            ("speed_increment", self.speed_increment),
            ("min_spawn_gap", self.min_spawn_gap),
            ("hitbox_inset", self.hitbox_inset),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("coin_spawn_rate", self.coin_spawn_rate),
            ("obstacle_spawn_rate", self.obstacle_spawn_rate),
            ("special_coin_chance", self.special_coin_chance),
            ("flavor_text_chance", self.flavor_text_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }

        if !(self.jump_velocity.is_finite() && self.jump_velocity < 0.0) {
            return Err(ConfigError::JumpVelocity(self.jump_velocity));
        }
        if self.blessing_threshold == 0 {
            return Err(ConfigError::ZeroBlessingThreshold);
        }
        if self.obstacle_min_height >= self.obstacle_max_height {
            return Err(ConfigError::ObstacleHeightRange {
                min: self.obstacle_min_height,
                max: self.obstacle_max_height,
            });
        }
        if self.lane_ease > 1.0 {
            return Err(ConfigError::PlayerDoesNotFit {
                reason: "lane ease overshoots the lane slot",
            });
        }
        if self.hitbox_inset >= 0.5 {
            return Err(ConfigError::PlayerDoesNotFit {
                reason: "hitbox inset removes the whole box",
            });
        }
        if self.player_width > self.lane_width() {
            return Err(ConfigError::PlayerDoesNotFit {
                reason: "player is wider than a lane",
            });
        }
        if self.ground_height + self.player_height > self.field_height {
            return Err(ConfigError::PlayerDoesNotFit {
                reason: "player and ground are taller than the field",
            });
        }

        Ok(())
    }

    /// Width of a single lane
    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.field_width / self.lanes as f32
    }

    /// Top edge of the ground strip
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.field_height - self.ground_height
    }

    /// Player's y (top of sprite) when standing
    #[inline]
    pub fn player_ground_y(&self) -> f32 {
        self.ground_top() - self.player_height
    }

    /// Player's x (left of sprite) when centered in `lane`
    #[inline]
    pub fn lane_slot_x(&self, lane: usize) -> f32 {
        let lane_width = self.lane_width();
        lane as f32 * lane_width + (lane_width - self.player_width) / 2.0
    }
}
