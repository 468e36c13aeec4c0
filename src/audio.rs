//! Audio cues
//!
//! The simulation only raises events; whatever plays sound sits behind
//! [`AudioNotifier`] and is never waited on.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin picked up
    CoinCollected,
    /// Player left the ground
    Jumped,
    /// Player ran into an obstacle
    Collided,
    /// Milestone bonus
    BlessingAchieved,
    /// Run beat the stored high score
    HighScore,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CoinCollected { .. } => Some(SoundEffect::CoinCollected),
            GameEvent::Jumped => Some(SoundEffect::Jumped),
            GameEvent::Collided => Some(SoundEffect::Collided),
            GameEvent::BlessingAchieved { .. } => Some(SoundEffect::BlessingAchieved),
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::Started
            | GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::GameOver { .. } => None,
        }
    }
}

/// Background music control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// Restart the track from the top
    Start,
    Pause,
    Resume,
    Stop,
}

impl MusicCue {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(MusicCue::Start),
            GameEvent::Paused => Some(MusicCue::Pause),
            GameEvent::Resumed => Some(MusicCue::Resume),
            GameEvent::GameOver { .. } => Some(MusicCue::Stop),
            _ => None,
        }
    }
}

/// Receives sound cues. Implementations must not block or fail loudly.
pub trait AudioNotifier {
    fn play(&mut self, effect: SoundEffect);

    fn music(&mut self, _cue: MusicCue) {}
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioNotifier for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio manager for the game
///
/// Applies mute and volume preferences, then hands cues to a backend.
/// Music the game wants playing is paused while inaudible and picked up
/// again once it is audible.
pub struct AudioManager<B: AudioNotifier> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// The game wants music (between Start/Resume and Pause/Stop)
    music_wanted: bool,
    /// The backend has been sent a Start since the last Stop
    backend_started: bool,
}

impl<B: AudioNotifier> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music_wanted: false,
            backend_started: false,
        }
    }

    /// Pick up volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(!settings.sound_enabled);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        let was_audible = self.music_audible();
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music(was_audible);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        let was_audible = self.music_audible();
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music(was_audible);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        let was_audible = self.music_audible();
        self.muted = muted;
        self.sync_music(was_audible);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn music_audible(&self) -> bool {
        self.effective_music_volume() > 0.0
    }

    /// Pause or pick up wanted music after an audibility change
    fn sync_music(&mut self, was_audible: bool) {
        let audible = self.music_audible();
        if audible == was_audible || !self.music_wanted {
            return;
        }
        if audible {
            self.send_playing();
        } else {
            self.backend.music(MusicCue::Pause);
        }
    }

    /// Resume the track, or start it if the backend never got a Start
    fn send_playing(&mut self) {
        let cue = if self.backend_started {
            MusicCue::Resume
        } else {
            MusicCue::Start
        };
        self.backend_started = true;
        self.backend.music(cue);
    }
}

impl<B: AudioNotifier> AudioNotifier for AudioManager<B> {
    fn play(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        self.backend.play(effect);
    }

    fn music(&mut self, cue: MusicCue) {
        match cue {
            MusicCue::Start => {
                self.music_wanted = true;
                // A fresh start always rewinds the track
                self.backend_started = false;
            }
            MusicCue::Resume => self.music_wanted = true,
            MusicCue::Pause => self.music_wanted = false,
            MusicCue::Stop => {
                self.music_wanted = false;
                self.backend_started = false;
                self.backend.music(MusicCue::Stop);
                return;
            }
        }

        if !self.music_audible() {
            return;
        }
        match cue {
            MusicCue::Start | MusicCue::Resume => self.send_playing(),
            MusicCue::Pause => self.backend.music(MusicCue::Pause),
            MusicCue::Stop => {}
        }
    }
}

/// Logs cues instead of playing them (headless hosts)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioNotifier for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {:?}", effect);
    }

    fn music(&mut self, cue: MusicCue) {
        log::debug!("music: {:?}", cue);
    }
}
