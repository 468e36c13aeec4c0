//! Presentation collaborators
//!
//! The simulation never draws. Hosts hand a `Renderer` the whole state once
//! per frame; `Hud` is the shared text formatting every renderer uses.

use std::fmt;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Draws one frame. Called after the frame's events have been dispatched.
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

/// Formatted HUD values
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: String,
    pub high_score: String,
    /// Whole metres, e.g. "123m"
    pub distance: String,
    /// One decimal, e.g. "5.0x"
    pub speed: String,
    pub blessings: String,
    /// Banner for the current phase, if any
    pub banner: Option<&'static str>,
    pub flavor_text: Option<String>,
}

/// Banner for the current phase, if any
pub fn phase_banner(state: &GameState) -> Option<&'static str> {
    match state.phase {
        GamePhase::Idle => Some("Press space to start"),
        GamePhase::Running => None,
        GamePhase::Paused => Some("Paused"),
        GamePhase::GameOver if state.new_high_score => Some("New high score!"),
        GamePhase::GameOver => Some("Game over"),
    }
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score.to_string(),
            high_score: state.high_score.to_string(),
            distance: format!("{}m", state.distance),
            speed: format!("{:.1}x", state.speed),
            blessings: state.blessings.to_string(),
            banner: phase_banner(state),
            flavor_text: state
                .flavor_text
                .as_ref()
                .and_then(|t| t.get(state.frames))
                .cloned(),
        }
    }

    /// The HUD as the player's settings want it: none when hidden, no
    /// floating text under reduced motion
    pub fn for_display(state: &GameState, settings: &Settings) -> Option<Self> {
        if !settings.show_hud {
            return None;
        }
        let mut hud = Self::from_state(state);
        if !settings.effective_decorations() {
            hud.flavor_text = None;
        }
        Some(hud)
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {} | best {} | {} | {} | blessings {}",
            self.score, self.high_score, self.distance, self.speed, self.blessings
        )?;
        if let Some(banner) = self.banner {
            write!(f, " | {}", banner)?;
        }
        Ok(())
    }
}

/// Headless renderer: logs the HUD periodically and on phase changes
#[derive(Debug)]
pub struct LogRenderer {
    every_frames: u64,
    settings: Settings,
    last_phase: Option<GamePhase>,
    frames_rendered: u64,
}

impl LogRenderer {
    pub fn new(every_frames: u64) -> Self {
        Self {
            every_frames: every_frames.max(1),
            settings: Settings::default(),
            last_phase: None,
            frames_rendered: 0,
        }
    }

    /// Honour HUD visibility and reduced motion
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.settings = settings.clone();
        self
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &GameState) {
        self.frames_rendered += 1;

        let phase_changed = self.last_phase != Some(state.phase);
        self.last_phase = Some(state.phase);

        if !phase_changed && !(state.is_running() && state.frames % self.every_frames == 0) {
            return;
        }

        match Hud::for_display(state, &self.settings) {
            Some(hud) => {
                log::info!("{}", hud);
                if let Some(text) = hud.flavor_text {
                    log::debug!("\"{}\"", text);
                }
            }
            // Hidden HUD still announces phase changes
            None => {
                if phase_changed && let Some(banner) = phase_banner(state) {
                    log::info!("{}", banner);
                }
            }
        }
    }
}
