//! Game state and lifecycle
//!
//! A `GameState` is one run: the player, the active entities, the score
//! counters and the seeded RNG. Lifecycle transitions live here; the
//! per-frame advance lives in `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Coin, CoinKind, Obstacle};
use super::player::Player;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the title screen
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-run
    Paused,
    /// Run ended by a collision; only a restart leaves this phase
    GameOver,
}

/// Discrete things that happened during a frame, drained by the host for
/// audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Jumped,
    CoinCollected { kind: CoinKind, value: u64 },
    BlessingAchieved { blessings: u32 },
    Collided,
    NewHighScore { score: u64 },
    GameOver { score: u64 },
}

/// A value that stops being visible after a given frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expiring<T> {
    pub value: T,
    /// First frame at which the value is gone
    pub expires_at: u64,
}

impl<T> Expiring<T> {
    pub fn new(value: T, now: u64, ttl_frames: u64) -> Self {
        Self {
            value,
            expires_at: now.saturating_add(ttl_frames),
        }
    }

    #[inline]
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    pub fn get(&self, now: u64) -> Option<&T> {
        (!self.is_expired(now)).then_some(&self.value)
    }
}

/// Phrases that occasionally float over the field (display only)
pub const FLAVOR_PHRASES: [&str; 8] = [
    "Keep running!",
    "Nice dodge!",
    "Watch your step!",
    "Faster!",
    "Don't look back!",
    "Almost there!",
    "What a run!",
    "Eyes forward!",
];

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete state of one run (deterministic for a given seed and input)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn/cosmetic RNG, seeded from `seed`
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Distance run (meters)
    pub distance: u64,
    /// Scroll speed (pixels per frame)
    pub speed: f32,
    pub blessings: u32,
    pub coins_collected: u32,
    /// Frames advanced in this run
    pub frames: u64,
    /// Best score seen so far, across runs
    pub high_score: u64,
    /// This run beat the previous high score
    pub new_high_score: bool,
    pub player: Player,
    /// Active coins, in spawn order
    pub coins: Vec<Coin>,
    /// Active obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Parallax scroll for the backdrop (not gameplay-affecting)
    pub background_offset: f32,
    /// Floating flavor text (not read by gameplay)
    pub flavor_text: Option<Expiring<String>>,
    pub tuning: Tuning,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game. Fails if `tuning` is malformed.
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::fresh(tuning, seed, high_score))
    }

    fn fresh(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            distance: 0,
            speed: tuning.initial_speed,
            blessings: 0,
            coins_collected: 0,
            frames: 0,
            high_score,
            new_high_score: false,
            player: Player::new(&tuning),
            coins: Vec::new(),
            obstacles: Vec::new(),
            background_offset: 0.0,
            flavor_text: None,
            tuning,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// A fresh idle state for the next run: same tuning, carried high
    /// score, next seed in the sequence
    pub fn reset(&self) -> Self {
        let seed = self
            .seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        Self::fresh(self.tuning.clone(), seed, self.high_score)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == GamePhase::Idle
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Idle -> Running. No-op from any other phase.
    pub fn start(&mut self) {
        if !self.is_idle() {
            return;
        }
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Started);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Replace this run with a fresh one and start it, from any phase
    pub fn restart(&mut self) {
        let pending = self.drain_events();
        *self = self.reset();
        self.events = pending;
        self.start();
    }

    /// Running -> Paused. Repeated calls are no-ops.
    pub fn pause(&mut self) {
        if self.is_running() {
            self.phase = GamePhase::Paused;
            self.push_event(GameEvent::Paused);
            log::info!("Paused at frame {}", self.frames);
        }
    }

    /// Paused -> Running. Repeated calls are no-ops.
    pub fn resume(&mut self) {
        if self.is_paused() {
            self.phase = GamePhase::Running;
            self.push_event(GameEvent::Resumed);
            log::info!("Resumed at frame {}", self.frames);
        }
    }

    /// Flip between Running and Paused; ignored in Idle and GameOver
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    pub fn move_left(&mut self) {
        if self.is_running() {
            self.player.move_left();
        }
    }

    pub fn move_right(&mut self) {
        if self.is_running() {
            self.player.move_right();
        }
    }

    /// Jump now if grounded, otherwise buffer the request
    pub fn request_jump(&mut self) {
        if !self.is_running() {
            return;
        }
        if self.player.request_jump(self.frames, &self.tuning) {
            self.push_event(GameEvent::Jumped);
        }
    }

    /// Running -> GameOver, settling the high score
    pub fn end_run(&mut self) {
        if !self.is_running() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.push_event(GameEvent::Collided);

        if self.score > self.high_score {
            log::info!(
                "New high score {} (previous {})",
                self.score,
                self.high_score
            );
            self.high_score = self.score;
            self.new_high_score = true;
            self.push_event(GameEvent::NewHighScore { score: self.score });
        }

        log::info!(
            "Game over: score {}, distance {}m, {} coins, {} blessings",
            self.score,
            self.distance,
            self.coins_collected,
            self.blessings
        );
        self.push_event(GameEvent::GameOver { score: self.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> GameState {
        GameState::new(Tuning::quiet(), 42, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_tuning() {
        let tuning = Tuning {
            lanes: 0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::new(tuning, 1, 0),
            Err(ConfigError::NoLanes)
        ));
    }

    #[test]
    fn test_new_state_is_idle_and_zeroed() {
        let state = idle();
        assert!(state.is_idle());
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0);
        assert_eq!(state.speed, state.tuning.initial_speed);
        assert!(state.coins.is_empty() && state.obstacles.is_empty());
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut state = idle();
        state.toggle_pause();
        assert!(state.is_idle(), "pause ignored while idle");

        state.start();
        assert!(state.is_running());

        state.pause();
        state.pause();
        assert!(state.is_paused());

        state.resume();
        state.resume();
        assert!(state.is_running());

        state.toggle_pause();
        assert!(state.is_paused());
        state.toggle_pause();
        assert!(state.is_running());

        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Started,
                GameEvent::Paused,
                GameEvent::Resumed,
                GameEvent::Paused,
                GameEvent::Resumed,
            ]
        );
    }

    #[test]
    fn test_game_over_is_terminal_until_restart() {
        let mut state = idle();
        state.start();
        state.end_run();
        assert!(state.is_game_over());

        state.toggle_pause();
        state.start();
        state.resume();
        assert!(state.is_game_over());

        state.restart();
        assert!(state.is_running());
    }

    #[test]
    fn test_intents_ignored_unless_running() {
        let mut state = idle();
        let lane = state.player.lane;
        state.move_left();
        state.request_jump();
        assert_eq!(state.player.lane, lane);
        assert!(!state.player.jumping);

        state.start();
        state.pause();
        state.move_right();
        state.request_jump();
        assert_eq!(state.player.lane, lane);
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_high_score_only_on_strict_improvement() {
        let mut state = GameState::new(Tuning::quiet(), 1, 100).unwrap();
        state.start();
        state.score = 100;
        state.end_run();
        assert_eq!(state.high_score, 100);
        assert!(!state.new_high_score);
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );

        state.restart();
        state.score = 101;
        state.end_run();
        assert_eq!(state.high_score, 101);
        assert!(state.new_high_score);
        assert!(state.events.contains(&GameEvent::NewHighScore { score: 101 }));
    }

    #[test]
    fn test_restart_resets_everything_but_high_score() {
        let mut state = idle();
        state.start();
        state.score = 500;
        state.distance = 1234;
        state.speed = 9.0;
        state.blessings = 2;
        state.coins_collected = 25;
        state.frames = 999;
        state.player.move_left();
        state.end_run();
        let old_seed = state.seed;

        state.restart();
        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0);
        assert_eq!(state.speed, state.tuning.initial_speed);
        assert_eq!(state.blessings, 0);
        assert_eq!(state.coins_collected, 0);
        assert_eq!(state.frames, 0);
        assert_eq!(state.player.lane, state.tuning.start_lane);
        assert_eq!(state.high_score, 500);
        assert!(!state.new_high_score);
        assert_ne!(state.seed, old_seed);
    }

    #[test]
    fn test_expiring_value() {
        let text = Expiring::new("hi", 10, 5);
        assert_eq!(text.get(10), Some(&"hi"));
        assert_eq!(text.get(14), Some(&"hi"));
        assert_eq!(text.get(15), None);
        assert!(text.is_expired(20));
    }
}
