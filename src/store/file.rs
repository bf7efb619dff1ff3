//! File-backed store
//!
//! One file per key under a data directory:
//! ```text
//! <data-dir>/
//! ├── cards.json
//! ├── decks.json
//! └── tags.json
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{KeyValueStore, Result};

/// Store that keeps each key's value in its own JSON file
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Default data directory (e.g. ~/.local/share/cardbox)
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("cardbox"))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        tokio::fs::write(self.key_path(key), value).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("cards").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrip() {
        let (_dir, store) = temp_store();
        store.set("cards", "[{\"id\":1}]".to_string()).await.unwrap();
        assert_eq!(
            store.get("cards").await.unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );
    }

    #[tokio::test]
    async fn test_values_land_in_key_files() {
        let (_dir, store) = temp_store();
        store.set("tags", "[]".to_string()).await.unwrap();
        assert!(store.dir.join("tags.json").exists());
    }
}
