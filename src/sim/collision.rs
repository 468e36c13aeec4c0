//! Collision detection and response
//!
//! Two tests run every frame after entities and the player have moved:
//! a radial pickup test against coins and an inset box test against
//! obstacles. Pickups feed the score; an impact while grounded ends the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Coin, CoinKind};
use super::state::{GameEvent, GameState};

/// Axis-aligned box in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink each side by `fraction` of the box's extent on that axis
    pub fn inset(&self, fraction: f32) -> Self {
        let margin = self.size() * fraction;
        Self {
            min: self.min + margin,
            max: self.max - margin,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Whether a coin is within pickup range of the player
///
/// Range is the sum of half the player's width and half the coin's size,
/// measured from the player's box center to the coin center.
pub fn coin_in_reach(player_box: &Aabb, coin: &Coin) -> bool {
    let reach = player_box.size().x / 2.0 + coin.size / 2.0;
    player_box.center().distance(coin.pos) < reach
}

/// Whether two sprites collide once both boxes are inset
pub fn boxes_collide(a: &Aabb, b: &Aabb, inset: f32) -> bool {
    a.inset(inset).overlaps(&b.inset(inset))
}

/// What the collision pass did this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub coins_collected: u32,
    pub blessings: u32,
    /// Id of the obstacle that ended the run
    pub fatal_obstacle: Option<u32>,
}

/// Run pickup and impact tests, applying score and lifecycle effects
pub fn check_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let player_box = state.player.bounds();

    // Pickups
    let mut picked: Vec<CoinKind> = Vec::new();
    for coin in state.coins.iter_mut().filter(|c| !c.collected) {
        if coin_in_reach(&player_box, coin) && coin.collect() {
            picked.push(coin.kind);
        }
    }
    for kind in picked {
        report.coins_collected += 1;
        if award_coin(state, kind) {
            report.blessings += 1;
        }
    }

    // Impacts. Airborne players clear everything.
    if state.player.jumping {
        return report;
    }
    let inset = state.tuning.hitbox_inset;
    let hit = state
        .obstacles
        .iter()
        .find(|o| boxes_collide(&player_box, &o.bounds(), inset))
        .map(|o| o.id);

    if let Some(id) = hit {
        log::debug!("Obstacle {} hit at frame {}", id, state.frames);
        report.fatal_obstacle = Some(id);
        state.end_run();
    }

    report
}

/// Score a collected coin. Returns true if it completed a blessing.
fn award_coin(state: &mut GameState, kind: CoinKind) -> bool {
    let value = match kind {
        CoinKind::Normal => state.tuning.coin_value,
        CoinKind::Special => state.tuning.special_coin_value,
    };
    state.score += value;
    state.coins_collected += 1;
    state.push_event(GameEvent::CoinCollected { kind, value });

    if state.coins_collected % state.tuning.blessing_threshold != 0 {
        return false;
    }

    state.blessings += 1;
    state.score += state.tuning.blessing_bonus;
    log::info!(
        "Blessing #{} after {} coins",
        state.blessings,
        state.coins_collected
    );
    state.push_event(GameEvent::BlessingAchieved {
        blessings: state.blessings,
    });
    true
}
