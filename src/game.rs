//! Frame driver
//!
//! `Game` owns one `GameState` plus the collaborators the simulation talks
//! to. Hosts feed it intents as they arrive and call `frame` once per
//! display refresh.

use crate::audio::{AudioNotifier, MusicCue, SoundEffect};
use crate::error::ConfigError;
use crate::highscores::HighScorePersistence;
use crate::platform::Intent;
use crate::renderer::Renderer;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Everything outside the simulation that a running game notifies
pub struct Collaborators {
    pub audio: Box<dyn AudioNotifier>,
    pub high_scores: Box<dyn HighScorePersistence>,
    pub renderer: Box<dyn Renderer>,
}

/// A playable game: state, pending input, collaborators
pub struct Game {
    state: GameState,
    input: TickInput,
    audio: Box<dyn AudioNotifier>,
    high_scores: Box<dyn HighScorePersistence>,
    renderer: Box<dyn Renderer>,
}

impl Game {
    /// Validates `tuning` and reads the stored high score once
    pub fn new(tuning: Tuning, seed: u64, collaborators: Collaborators) -> Result<Self, ConfigError> {
        let Collaborators {
            audio,
            mut high_scores,
            renderer,
        } = collaborators;

        let high_score = high_scores.load();
        let state = GameState::new(tuning, seed, high_score)?;

        Ok(Self {
            state,
            input: TickInput::default(),
            audio,
            high_scores,
            renderer,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Queue an intent for the next frame
    pub fn handle(&mut self, intent: Intent) {
        intent.apply(&mut self.input);
    }

    /// Demo mode stays on across frames until switched off
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Advance one frame, dispatch its events, then draw
    pub fn frame(&mut self) {
        tick(&mut self.state, &self.input);

        // Intents are one-shot; autopilot is a mode
        self.input = TickInput {
            autopilot: self.input.autopilot,
            ..TickInput::default()
        };

        for event in self.state.drain_events() {
            self.dispatch(event);
        }

        self.renderer.render(&self.state);
    }

    fn dispatch(&mut self, event: GameEvent) {
        if let Some(effect) = SoundEffect::for_event(&event) {
            self.audio.play(effect);
        }
        if let Some(cue) = MusicCue::for_event(&event) {
            self.audio.music(cue);
        }

        if let GameEvent::NewHighScore { score } = event
            && let Err(e) = self.high_scores.save(score)
        {
            log::warn!("Failed to save high score {}: {}", score, e);
        }
    }
}
