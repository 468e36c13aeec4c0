//! High score storage
//!
//! One best score, loaded when a game is created and written only when a
//! run beats it.

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::{KeyValueStore, load_json, save_json};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "lane_runner_high_score";

/// Where the best score lives between sessions
pub trait HighScorePersistence {
    /// Stored best score, 0 if none or unreadable
    fn load(&mut self) -> u64;
    fn save(&mut self, score: u64) -> Result<(), PersistenceError>;
}

/// Stored form of the best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u64,
}

/// High score kept in any key-value store
#[derive(Debug, Clone)]
pub struct StoredHighScore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StoredHighScore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read(&self) -> Result<u64, PersistenceError> {
        // Older saves hold a bare number rather than a record
        if let Some(raw) = self.store.get(STORAGE_KEY)?
            && let Ok(score) = raw.trim().parse::<u64>()
        {
            return Ok(score);
        }
        Ok(load_json::<HighScoreRecord>(&self.store, STORAGE_KEY)?
            .map(|r| r.score)
            .unwrap_or(0))
    }
}

impl<S: KeyValueStore> HighScorePersistence for StoredHighScore<S> {
    fn load(&mut self) -> u64 {
        match self.read() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {}", e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), PersistenceError> {
        save_json(&mut self.store, STORAGE_KEY, &HighScoreRecord { score })?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_empty_store_loads_zero() {
        let mut scores = StoredHighScore::new(MemoryStore::new());
        assert_eq!(scores.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut scores = StoredHighScore::new(MemoryStore::new());
        scores.save(1280).unwrap();
        assert_eq!(scores.load(), 1280);
        assert_eq!(scores.store().writes(), 1);
    }

    #[test]
    fn test_bare_number_is_accepted() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "350").unwrap();
        let mut scores = StoredHighScore::new(store);
        assert_eq!(scores.load(), 350);
    }

    #[test]
    fn test_corrupt_record_loads_zero() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{\"score\": \"lots\"}").unwrap();
        let mut scores = StoredHighScore::new(store);
        assert_eq!(scores.load(), 0);
    }
}
