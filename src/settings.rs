//! Player preferences
//!
//! Persisted separately from the high score, under its own key.

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::{KeyValueStore, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound on/off
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Display ===
    /// Reduced motion (no parallax, no floating text)
    pub reduced_motion: bool,
    /// Show the HUD line
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,

            reduced_motion: false,
            show_hud: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "lane_runner_settings";

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    /// Whether decorative motion (parallax, floating text) should be shown
    pub fn effective_decorations(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings, falling back to defaults if absent or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<Settings>(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), PersistenceError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_settings_use_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_toggles_persist() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.toggle_sound();
        settings.reduced_motion = true;
        settings.save(&mut store).unwrap();

        let loaded = Settings::load(&store);
        assert!(!loaded.sound_enabled);
        assert!(!loaded.effective_decorations());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"show_hud": false}"#)
            .unwrap();
        let loaded = Settings::load(&store);
        assert!(!loaded.show_hud);
        assert!(loaded.sound_enabled);
        assert_eq!(loaded.master_volume, 0.8);
    }
}
