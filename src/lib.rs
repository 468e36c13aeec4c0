//! Lane Runner - A side-scrolling lane-based arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, entities, collisions, game state)
//! - `tuning`: Validated game balance constants
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `renderer` / `audio`: Presentation collaborators
//! - `highscores` / `persistence` / `settings`: Stored values
//! - `platform`: Input device mapping

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, PersistenceError};
pub use game::{Collaborators, Game};
pub use highscores::HighScorePersistence;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the per-frame constants were tuned for
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Playfield dimensions (screen coordinates, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Lanes
    pub const LANES: usize = 3;
    pub const PLAYER_START_LANE: usize = 1;
    /// Fraction of the remaining distance to the lane slot covered per frame
    pub const LANE_EASE: f32 = 0.2;

    /// Player sprite
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;

    /// Jump kinematics (per frame, negative is up)
    pub const JUMP_VELOCITY: f32 = -18.0;
    pub const GRAVITY: f32 = 0.8;
    /// Early jump input is honoured for this many frames (~100ms)
    pub const JUMP_BUFFER_FRAMES: u64 = 6;

    /// Scroll speed
    pub const GAME_SPEED_START: f32 = 5.0;
    pub const GAME_SPEED_INCREMENT: f32 = 0.001;
    /// Distance gained per frame is floor(speed / DISTANCE_DIVISOR)
    pub const DISTANCE_DIVISOR: f32 = 5.0;

    /// Spawning
    pub const COIN_SPAWN_RATE: f64 = 0.03;
    pub const OBSTACLE_SPAWN_RATE: f64 = 0.02;
    pub const SPECIAL_COIN_CHANCE: f64 = 0.1;
    pub const COIN_SPAWN_JITTER: f32 = 100.0;
    pub const OBSTACLE_SPAWN_JITTER: f32 = 200.0;

    /// Entity geometry
    pub const COIN_SIZE: f32 = 30.0;
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_WIDE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 50.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 120.0;
    pub const OBSTACLE_WOBBLE_AMPLITUDE: f32 = 10.0;

    /// Fraction of each side trimmed from sprite bounds before impact tests
    pub const HITBOX_INSET: f32 = 0.1;

    /// Scoring
    pub const COIN_VALUE: u64 = 10;
    pub const SPECIAL_COIN_VALUE: u64 = 50;
    pub const BLESSING_BONUS: u64 = 100;
    pub const BLESSING_COIN_THRESHOLD: u32 = 10;

    /// Flavor text (display only)
    pub const FLAVOR_TEXT_CHANCE: f64 = 0.005;
    pub const FLAVOR_TEXT_FRAMES: u64 = 2 * FRAMES_PER_SECOND as u64;
}
