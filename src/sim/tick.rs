//! Per-frame simulation step
//!
//! Core game loop that advances the run by exactly one frame.

use rand::Rng;

use super::autopilot;
use super::collision::check_collisions;
use super::spawn::spawn_entities;
use super::state::{Expiring, FLAVOR_PHRASES, GameEvent, GameState};
use crate::consts::DISTANCE_DIVISOR;

/// Input intents for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump (or buffer a jump while airborne)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start from idle, or begin a fresh run from any other phase
    pub restart: bool,
    /// Demo mode - the autopilot adds its own jumps
    pub autopilot: bool,
}

/// Apply `input` and advance the game state by one frame
///
/// Nothing advances unless the phase ends up `Running`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        if state.is_idle() {
            state.start();
        } else {
            state.restart();
        }
        return;
    }

    if input.pause {
        state.toggle_pause();
    }

    // Don't tick unless running
    if !state.is_running() {
        return;
    }

    if input.move_left {
        state.move_left();
    }
    if input.move_right {
        state.move_right();
    }
    if input.jump || (input.autopilot && autopilot::wants_jump(state)) {
        state.request_jump();
    }

    advance_frame(state);
}

/// One frame of world simulation. Caller guarantees the run is active.
fn advance_frame(state: &mut GameState) {
    // World speed and distance
    state.speed += state.tuning.speed_increment;
    state.distance += (state.speed / DISTANCE_DIVISOR).floor() as u64;
    state.background_offset =
        (state.background_offset - state.speed / 2.0) % state.tuning.field_width;
    update_flavor_text(state);

    // Entities scroll, then anything collected or gone leaves
    let speed = state.speed;
    let frame = state.frames;
    for coin in &mut state.coins {
        coin.update(speed);
    }
    for obstacle in &mut state.obstacles {
        obstacle.update(speed, frame);
    }
    state.coins.retain(|c| !c.is_expired());
    state.obstacles.retain(|o| !o.is_off_screen());

    // Player
    if state.player.advance(frame, &state.tuning) {
        state.push_event(GameEvent::Jumped);
    }

    let report = check_collisions(state);
    if report.coins_collected > 0 {
        log::trace!(
            "Frame {}: {} coin(s), score {}",
            frame,
            report.coins_collected,
            state.score
        );
    }

    if state.is_running() {
        spawn_entities(state);
    }

    state.frames += 1;
}

/// Expire the current flavor text, or occasionally pick a new one
fn update_flavor_text(state: &mut GameState) {
    let now = state.frames;
    if state.flavor_text.as_ref().is_some_and(|t| t.is_expired(now)) {
        state.flavor_text = None;
    }
    if state.flavor_text.is_none() && state.rng.random_bool(state.tuning.flavor_text_chance) {
        let phrase = FLAVOR_PHRASES[state.rng.random_range(0..FLAVOR_PHRASES.len())];
        state.flavor_text = Some(Expiring::new(
            phrase.to_string(),
            now,
            state.tuning.flavor_text_frames,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Coin, CoinKind, Obstacle, ObstacleKind};
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn constant_speed() -> Tuning {
        Tuning {
            speed_increment: 0.0,
            ..Tuning::quiet()
        }
    }

    fn running(tuning: Tuning) -> GameState {
        let mut state = GameState::new(tuning, 12345, 0).unwrap();
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert!(state.is_running());
        state
    }

    /// Obstacle that will sit on the player after this frame's scroll
    fn obstacle_on_player(state: &mut GameState) {
        let id = state.next_entity_id();
        let x = state.player.pos.x + state.speed + state.tuning.speed_increment;
        let ground_top = state.tuning.ground_top();
        state.obstacles.push(Obstacle::new(
            id,
            state.player.lane,
            ObstacleKind::Crate,
            x,
            80.0,
            ground_top,
            0.0,
        ));
    }

    #[test]
    fn test_restart_from_idle_starts() {
        let mut state = GameState::new(Tuning::default(), 5, 0).unwrap();
        let seed = state.seed;
        tick(&mut state, &TickInput::default());
        assert!(state.is_idle());
        assert_eq!(state.frames, 0);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.seed, seed);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = running(Tuning::default());
        tick(&mut state, &TickInput::default());
        let frames = state.frames;
        let distance = state.distance;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.frames, frames);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.frames, frames);
        assert_eq!(state.distance, distance);

        // Unpause advances the same tick
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.frames, frames + 1);
    }

    #[test]
    fn test_resume_into_obstacle_advances_then_ends() {
        let mut state = running(constant_speed());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert!(state.is_paused());

        obstacle_on_player(&mut state);
        let frames = state.frames;
        let distance = state.distance;

        tick(&mut state, &pause);
        assert!(state.is_game_over());
        assert_eq!(state.frames, frames + 1);
        assert!(state.distance > distance);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Resumed));
        assert!(events.contains(&GameEvent::Collided));
    }

    #[test]
    fn test_speed_and_distance_grow() {
        let mut state = running(Tuning::quiet());
        tick(&mut state, &TickInput::default());
        assert!(state.speed > state.tuning.initial_speed);
        assert_eq!(state.distance, 1);

        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.frames, 101);
        assert_eq!(state.distance, 101);
    }

    #[test]
    fn test_special_coin_pickup_scenario() {
        let mut state = running(constant_speed());
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }

        let center = state.player.bounds().center();
        let id = state.next_entity_id();
        let size = state.tuning.coin_size;
        state
            .coins
            .push(Coin::new(id, state.player.lane, center, size, CoinKind::Special));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 50);
        assert_eq!(state.coins_collected, 1);
        assert!(state.coins.iter().all(|c| c.collected));

        tick(&mut state, &TickInput::default());
        assert!(state.coins.iter().all(|c| c.id != id));
    }

    #[test]
    fn test_jump_scenario() {
        let mut state = running(constant_speed());
        let ground = state.player.ground_y;

        state.request_jump();
        assert!(state.player.jumping, "jumping before any frame advances");
        assert!(state.drain_events().contains(&GameEvent::Jumped));

        let mut last_y = state.player.pos.y;
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
            assert!(state.player.pos.y < last_y);
            last_y = state.player.pos.y;
        }

        let mut guard = 0;
        while state.player.jumping {
            tick(&mut state, &TickInput::default());
            assert!(state.player.pos.y <= ground);
            guard += 1;
            assert!(guard < 1000);
        }
        assert_eq!(state.player.pos.y, ground);
    }

    #[test]
    fn test_overlap_while_jumping_survives() {
        let mut state = running(constant_speed());
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert!(state.player.jumping);

        obstacle_on_player(&mut state);
        let before = state.obstacles[0].bounds();
        tick(&mut state, &TickInput::default());
        assert!(state.player.bounds().overlaps(&before));
        assert!(state.is_running());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_overlap_while_grounded_ends_run() {
        let mut state = running(constant_speed());
        state.score = 1234;
        obstacle_on_player(&mut state);

        tick(&mut state, &TickInput::default());
        assert!(!state.is_running());
        assert!(state.is_game_over());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Collided));
        assert!(events.contains(&GameEvent::GameOver { score: 1234 }));
        assert!(events.contains(&GameEvent::NewHighScore { score: 1234 }));

        // Frozen until restart
        let frames = state.frames;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.frames, frames);
    }

    #[test]
    fn test_entities_leave_past_left_edge() {
        let mut state = running(constant_speed());
        let id = state.next_entity_id();
        state.coins.push(Coin::new(
            id,
            0,
            Vec2::new(-26.0, 0.0),
            state.tuning.coin_size,
            CoinKind::Normal,
        ));
        // Far from the player, scrolled off on the first frame
        tick(&mut state, &TickInput::default());
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_flavor_text_expires() {
        let mut state = running(Tuning {
            flavor_text_chance: 1.0,
            flavor_text_frames: 3,
            ..Tuning::quiet()
        });
        tick(&mut state, &TickInput::default());
        let first = state.flavor_text.clone().unwrap();
        assert_eq!(first.expires_at, 3);
        assert!(FLAVOR_PHRASES.contains(&first.value.as_str()));

        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        let next = state.flavor_text.clone().unwrap();
        assert_eq!(next.expires_at, 6);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = running(Tuning::default());
        let mut state2 = running(Tuning::default());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.frames, state2.frames);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.coins.len(), state2.coins.len());
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.phase, state2.phase);
    }

    proptest! {
        #[test]
        fn prop_distance_and_speed_never_decrease(
            seed in any::<u64>(),
            moves in prop::collection::vec(0u8..5, 1..400),
        ) {
            let mut state = GameState::new(Tuning::default(), seed, 0).unwrap();
            state.start();
            for m in moves {
                let input = TickInput {
                    move_left: m == 1,
                    move_right: m == 2,
                    jump: m == 3,
                    pause: m == 4,
                    ..Default::default()
                };
                let (speed, distance) = (state.speed, state.distance);
                let was_running = state.is_running();
                tick(&mut state, &input);
                prop_assert!(state.speed >= speed);
                prop_assert!(state.distance >= distance);
                prop_assert!(state.player.lane < state.tuning.lanes);
                // A resume toggle advances a frame even if it ends the run
                if !was_running && !state.is_running() && !input.pause {
                    prop_assert_eq!(state.speed, speed);
                    prop_assert_eq!(state.distance, distance);
                }
                if !state.player.jumping {
                    prop_assert_eq!(state.player.pos.y, state.player.ground_y);
                }
            }
        }

        #[test]
        fn prop_collected_coins_never_linger(seed in any::<u64>()) {
            let mut state = GameState::new(
                Tuning { coin_spawn_rate: 0.5, obstacle_spawn_rate: 0.0, ..Tuning::default() },
                seed,
                0,
            ).unwrap();
            state.start();
            for _ in 0..300 {
                let collected_before: Vec<u32> =
                    state.coins.iter().filter(|c| c.collected).map(|c| c.id).collect();
                tick(&mut state, &TickInput::default());
                for id in collected_before {
                    prop_assert!(state.coins.iter().all(|c| c.id != id));
                }
            }
        }
    }
}
