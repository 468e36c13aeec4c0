//! Coins and obstacles
//!
//! Both scroll left at the shared world speed. Spin and rotation phases are
//! cosmetic; only position and size feed collision, with the exception of
//! the wobbling obstacle whose live `y` is real geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::{OBSTACLE_WIDE_WIDTH, OBSTACLE_WIDTH, OBSTACLE_WOBBLE_AMPLITUDE};

/// Spin added to a coin each frame (radians)
const COIN_SPIN_RATE: f32 = 0.1;
/// Base rotation added to every obstacle each frame (radians)
const OBSTACLE_ROTATION_RATE: f32 = 0.05;
/// Wobble phase advance per frame
const WOBBLE_FREQUENCY: f32 = 0.1;

/// Coin value class, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoinKind {
    #[default]
    Normal,
    Special,
}

/// A collectible coin. `pos` is the coin center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    /// Lane it was spawned into (cosmetic, pickup uses `pos`)
    pub lane: usize,
    pub pos: Vec2,
    pub size: f32,
    pub kind: CoinKind,
    pub collected: bool,
    pub spin: f32,
}

impl Coin {
    pub fn new(id: u32, lane: usize, pos: Vec2, size: f32, kind: CoinKind) -> Self {
        Self {
            id,
            lane,
            pos,
            size,
            kind,
            collected: false,
            spin: 0.0,
        }
    }

    /// Scroll and spin
    pub fn update(&mut self, speed: f32) {
        self.pos.x -= speed;
        self.spin += COIN_SPIN_RATE;
    }

    /// Mark collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x <= -self.size
    }

    /// Whether the coin should leave the active set
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.collected || self.is_off_screen()
    }
}

/// Obstacle variants. Only the blob differs in geometry: it is wider and
/// bobs vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Ring,
    Loaf,
    Scroll,
    Spinner,
    Crate,
    Blob,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 6] = [
        ObstacleKind::Ring,
        ObstacleKind::Loaf,
        ObstacleKind::Scroll,
        ObstacleKind::Spinner,
        ObstacleKind::Crate,
        ObstacleKind::Blob,
    ];

    pub fn width(self) -> f32 {
        match self {
            ObstacleKind::Blob => OBSTACLE_WIDE_WIDTH,
            _ => OBSTACLE_WIDTH,
        }
    }

    /// Vertical oscillation around the resting position
    pub fn wobbles(self) -> bool {
        self == ObstacleKind::Blob
    }

    /// Extra rotation per frame on top of the shared base rate
    pub fn spin_rate(self) -> f32 {
        match self {
            ObstacleKind::Spinner => 0.2,
            _ => 0.0,
        }
    }
}

/// An obstacle. `pos` is the top-left corner of its sprite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: usize,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Resting y (sitting on the ground)
    pub base_y: f32,
    pub rotation: f32,
    pub wobble_phase: f32,
}

impl Obstacle {
    /// Create an obstacle standing on `ground_top`
    pub fn new(
        id: u32,
        lane: usize,
        kind: ObstacleKind,
        x: f32,
        height: f32,
        ground_top: f32,
        wobble_phase: f32,
    ) -> Self {
        let base_y = ground_top - height;
        Self {
            id,
            lane,
            kind,
            pos: Vec2::new(x, base_y),
            width: kind.width(),
            height,
            base_y,
            rotation: 0.0,
            wobble_phase,
        }
    }

    /// Scroll, rotate and (for the blob) bob. `frame` drives the bob.
    pub fn update(&mut self, speed: f32, frame: u64) {
        self.pos.x -= speed;
        self.rotation += OBSTACLE_ROTATION_RATE + self.kind.spin_rate();

        if self.kind.wobbles() {
            let phase = frame as f32 * WOBBLE_FREQUENCY + self.wobble_phase;
            self.pos.y = self.base_y + phase.sin() * OBSTACLE_WOBBLE_AMPLITUDE;
        }
    }

    /// Full sprite bounds
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x <= -self.width
    }
}
