//! File-backed store for native builds
//!
//! Each key is a `<key>.json` file in one directory. Writes go to a temp
//! file first and are renamed into place, so a crash mid-write never leaves
//! a truncated value behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!(
            "lane-runner-{}-{}-{}",
            name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_missing_key_reads_none() {
        let store = FileStore::new(scratch_dir("missing"));
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = scratch_dir("roundtrip");
        let mut store = FileStore::new(&dir);
        store.set("high_score", "{\"best\":42}").unwrap();
        store.set("high_score", "{\"best\":43}").unwrap();
        assert_eq!(
            store.get("high_score").unwrap().as_deref(),
            Some("{\"best\":43}")
        );
        assert_eq!(store.dir(), dir.as_path());
        assert!(dir.join("high_score.json").exists());
        assert!(!dir.join("high_score.json.tmp").exists());
        let _ = fs::remove_dir_all(dir);
    }
}
