//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One frame per `tick`, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionReport, boxes_collide, check_collisions, coin_in_reach};
pub use entity::{Coin, CoinKind, Obstacle, ObstacleKind};
pub use player::Player;
pub use spawn::{SpawnReport, spawn_coin, spawn_entities, spawn_obstacle};
pub use state::{Expiring, FLAVOR_PHRASES, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
