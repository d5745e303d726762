use crate::core::models::ThumbnailMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read-modify-write store for the accumulated thumbnail mapping, kept as
/// one pretty-printed JSON file.
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file reads as an empty map. A file that exists but cannot
    /// be read or parsed is an error; the caller decides whether that is
    /// fatal.
    pub fn load(&self) -> Result<ThumbnailMap, StoreError> {
        if !self.path.exists() {
            return Ok(ThumbnailMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites the whole file. Not transactional: a crash mid-write can
    /// truncate the file, which later loads as an error and degrades to an
    /// empty map upstream.
    pub fn save(&self, map: &ThumbnailMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ResultStore {
        ResultStore::new(dir.path().join("results.json"))
    }

    #[test]
    fn test_load_missing_file_returns_empty_map() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut map = ThumbnailMap::new();
        map.insert("9780134190440".into(), "http://x/t.jpg".into());
        map.insert("9780000000001".into(), "http://x/a.jpg".into());

        store.save(&map).unwrap();
        assert_eq!(store.load().unwrap(), map);
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(dir.path().join("results.json"), "not json {").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("nested").join("results.json");
        let store = ResultStore::new(nested.clone());

        store.save(&ThumbnailMap::new()).unwrap();

        assert!(nested.exists());
    }

    #[test]
    fn test_save_overwrites_prior_contents() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut first = ThumbnailMap::new();
        first.insert("9780000000001".into(), "http://x/a.jpg".into());
        store.save(&first).unwrap();

        let mut second = ThumbnailMap::new();
        second.insert("9780000000002".into(), "http://x/b.jpg".into());
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
    }

    #[test]
    fn test_saved_file_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut map = ThumbnailMap::new();
        map.insert("9780134190440".into(), "http://x/t.jpg".into());
        store.save(&map).unwrap();

        let content = fs::read_to_string(dir.path().join("results.json")).unwrap();
        assert!(content.contains('\n'));
    }
}
