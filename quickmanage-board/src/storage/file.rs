//! File-backed key-value store: one file per key

use super::KeyValueStore;
use crate::error::{BoardError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::trace;

/// Stores each key as `<root>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(BoardError::storage(key, "invalid storage key"));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path).await?))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        trace!(path = %path.display(), bytes = value.len(), "writing key");
        atomic_write(&path, value.as_bytes())
            .await
            .map_err(|e| BoardError::storage(key, e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| BoardError::storage(key, e.to_string()))?;
        }
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target
async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join(".quickmanage"));
        (temp, store)
    }

    #[test]
    fn test_key_path() {
        let (temp, store) = setup();
        assert_eq!(
            store.key_path("quickmanage_board").unwrap(),
            temp.path().join(".quickmanage").join("quickmanage_board.json")
        );
        assert!(store.key_path("../escape").is_err());
        assert!(store.key_path("").is_err());
    }

    #[tokio::test]
    async fn test_set_creates_directory() {
        let (_temp, store) = setup();
        assert!(store.get("quickmanage_board").await.unwrap().is_none());

        store.set("quickmanage_board", "{\"columns\":[]}").await.unwrap();
        assert!(store.root().is_dir());
        assert_eq!(
            store.get("quickmanage_board").await.unwrap().as_deref(),
            Some("{\"columns\":[]}")
        );
        assert!(!store.root().join("quickmanage_board.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove() {
        let (_temp, store) = setup();
        store.set("quickmanage_view_mode", "\"normal\"").await.unwrap();
        store.remove("quickmanage_view_mode").await.unwrap();
        assert!(store.get("quickmanage_view_mode").await.unwrap().is_none());
        store.remove("quickmanage_view_mode").await.unwrap();
    }
}
