//! Key-value persistence for the board document and view mode.
//!
//! Two string keys hold everything: the JSON document and the JSON-quoted
//! view mode. A store only moves strings; `StorageGateway` owns the keys,
//! the serialization, and the read-failure policy (log and treat as absent).

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::migrate::{parse_document, MigrationStats};
use crate::types::{Document, ViewMode};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key holding the serialized board document
pub const BOARD_KEY: &str = "quickmanage_board";

/// Key holding the serialized view mode
pub const VIEW_MODE_KEY: &str = "quickmanage_view_mode";

/// A string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Read a key; `None` when it was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Everything that gets persisted, taken at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub document: Document,
    pub view_mode: ViewMode,
}

/// Typed access to the persisted board
#[derive(Debug, Clone)]
pub struct StorageGateway {
    store: Arc<dyn KeyValueStore>,
    default_tag_color: String,
}

impl StorageGateway {
    pub fn new(store: Arc<dyn KeyValueStore>, default_tag_color: impl Into<String>) -> Self {
        Self {
            store,
            default_tag_color: default_tag_color.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Load the stored document, migrating legacy fields.
    ///
    /// A missing key, unreadable store, or unparseable value all yield
    /// `None`; the caller falls back to the default board.
    pub async fn load_document(&self) -> Option<(Document, MigrationStats)> {
        let text = self.read(BOARD_KEY).await?;
        match parse_document(&text, &self.default_tag_color) {
            Ok((document, stats)) => {
                if !stats.is_empty() {
                    info!(?stats, "migrated stored board");
                }
                Some((document, stats))
            }
            Err(e) => {
                warn!(key = BOARD_KEY, error = %e, "ignoring unreadable stored board");
                None
            }
        }
    }

    pub async fn save_document(&self, document: &Document) -> Result<()> {
        let text = serde_json::to_string(document)?;
        self.store.set(BOARD_KEY, &text).await
    }

    /// Load the stored view mode, `Normal` when absent or unreadable
    pub async fn load_view_mode(&self) -> ViewMode {
        let Some(text) = self.read(VIEW_MODE_KEY).await else {
            return ViewMode::default();
        };
        match text.parse() {
            Ok(mode) => mode,
            Err(e) => {
                warn!(key = VIEW_MODE_KEY, error = %e, "ignoring unreadable view mode");
                ViewMode::default()
            }
        }
    }

    pub async fn save_view_mode(&self, mode: ViewMode) -> Result<()> {
        let text = serde_json::to_string(&mode)?;
        self.store.set(VIEW_MODE_KEY, &text).await
    }

    /// Write both keys
    pub async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        self.save_document(&snapshot.document).await?;
        self.save_view_mode(snapshot.view_mode).await?;
        debug!(columns = snapshot.document.columns.len(), "saved board");
        Ok(())
    }

    /// Remove both keys
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(BOARD_KEY).await?;
        self.store.remove(VIEW_MODE_KEY).await
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "storage read failed");
                None
            }
        }
    }
}
