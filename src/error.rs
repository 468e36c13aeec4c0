//! Error types
//!
//! Gameplay itself has no failure modes; errors come from malformed tuning
//! (fail fast at construction) and from storage backends.

use thiserror::Error;

/// A tuning value that cannot produce a playable game
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("lane count must be at least 1")]
    NoLanes,
    #[error("start lane {start} is outside 0..{lanes}")]
    StartLaneOutOfRange { start: usize, lanes: usize },
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("jump velocity must point upward (negative), got {0}")]
    JumpVelocity(f32),
    #[error("blessing threshold must be at least 1")]
    ZeroBlessingThreshold,
    #[error("obstacle height range is empty: min {min} >= max {max}")]
    ObstacleHeightRange { min: f32, max: f32 },
    #[error("player does not fit the field: {reason}")]
    PlayerDoesNotFit { reason: &'static str },
    #[error("invalid tuning json: {0}")]
    Json(String),
}

/// A storage backend failed to read or write a value
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend rejected {key}")]
    Rejected { key: String },
}
