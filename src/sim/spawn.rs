//! Spawning of coins and obstacles
//!
//! Each frame rolls independently for one coin and one obstacle, each
//! dropped into a uniformly random lane just past the right edge.
//! Consecutive spawns may overlap in the same lane unless
//! `Tuning::min_spawn_gap` is set.

use glam::Vec2;
use rand::Rng;

use super::entity::{Coin, CoinKind, Obstacle, ObstacleKind};
use super::state::GameState;
use crate::consts::{COIN_SPAWN_JITTER, OBSTACLE_SPAWN_JITTER};

/// What spawned this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub coin: Option<u32>,
    pub obstacle: Option<u32>,
}

/// Roll for new entities
pub fn spawn_entities(state: &mut GameState) -> SpawnReport {
    let mut report = SpawnReport::default();

    let coin_rate = state.tuning.coin_spawn_rate;
    if state.rng.random_bool(coin_rate) {
        let lane = state.rng.random_range(0..state.tuning.lanes);
        report.coin = spawn_coin(state, lane);
    }

    let obstacle_rate = state.tuning.obstacle_spawn_rate;
    if state.rng.random_bool(obstacle_rate) {
        let lane = state.rng.random_range(0..state.tuning.lanes);
        let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
        report.obstacle = spawn_obstacle(state, lane, kind);
    }

    report
}

/// Add a coin to `lane`. Returns its id, or None if spacing blocked it.
pub fn spawn_coin(state: &mut GameState, lane: usize) -> Option<u32> {
    if lane_crowded(state.coins.iter().map(|c| (c.lane, c.pos.x)), lane, state) {
        return None;
    }

    let tuning = &state.tuning;
    let x = tuning.field_width + state.rng.random::<f32>() * COIN_SPAWN_JITTER;
    let y = tuning.ground_top() - tuning.coin_size / 2.0;
    let size = tuning.coin_size;
    let kind = if state.rng.random_bool(tuning.special_coin_chance) {
        CoinKind::Special
    } else {
        CoinKind::Normal
    };

    let id = state.next_entity_id();
    state
        .coins
        .push(Coin::new(id, lane, Vec2::new(x, y), size, kind));
    log::trace!("Spawned {:?} coin {} in lane {}", kind, id, lane);
    Some(id)
}

/// Add an obstacle of `kind` to `lane`. Returns its id, or None if spacing
/// blocked it.
pub fn spawn_obstacle(state: &mut GameState, lane: usize, kind: ObstacleKind) -> Option<u32> {
    if lane_crowded(
        state.obstacles.iter().map(|o| (o.lane, o.pos.x)),
        lane,
        state,
    ) {
        return None;
    }

    let tuning = &state.tuning;
    let x = tuning.field_width + state.rng.random::<f32>() * OBSTACLE_SPAWN_JITTER;
    let height = state
        .rng
        .random_range(tuning.obstacle_min_height..tuning.obstacle_max_height);
    let ground_top = tuning.ground_top();
    let wobble_phase = state.rng.random::<f32>() * 0.1;

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::new(
        id,
        lane,
        kind,
        x,
        height,
        ground_top,
        wobble_phase,
    ));
    log::trace!("Spawned {:?} obstacle {} in lane {}", kind, id, lane);
    Some(id)
}

/// Whether `lane` already holds an entity within the spawn gap of the
/// right edge
fn lane_crowded(
    mut entities: impl Iterator<Item = (usize, f32)>,
    lane: usize,
    state: &GameState,
) -> bool {
    let gap = state.tuning.min_spawn_gap;
    if gap <= 0.0 {
        return false;
    }
    let edge = state.tuning.field_width;
    entities.any(|(l, x)| l == lane && x > edge - gap)
}
