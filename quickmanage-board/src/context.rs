//! BoardContext - state and storage access for board commands
//!
//! The context holds the in-memory board and knows how to persist it. It has
//! no business logic; commands lock the state and call the pure helpers on
//! `Document`.

use crate::config::BoardConfig;
use crate::error::Result;
use crate::notification::{Notification, Notifier};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, Snapshot, StorageGateway};
use crate::types::{Document, ViewMode};
use crate::writer::SaveWriter;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

/// Mutable board state guarded by the context
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub document: Document,
    pub view_mode: ViewMode,
    /// True while the stored board is being read; saves are skipped
    pub loading: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            document: Document::default_board(),
            view_mode: ViewMode::Normal,
            loading: false,
        }
    }
}

/// Context passed to every command
#[derive(Debug)]
pub struct BoardContext {
    config: BoardConfig,
    gateway: StorageGateway,
    state: RwLock<BoardState>,
    notifier: Notifier,
    writer: Option<SaveWriter>,
}

impl BoardContext {
    /// Create a context over `store`. Saves are written immediately.
    pub fn new(config: BoardConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let gateway = StorageGateway::new(store, config.default_tag_color.clone());
        Self {
            config,
            gateway,
            state: RwLock::new(BoardState::default()),
            notifier: Notifier::new(),
            writer: None,
        }
    }

    /// Context over a fresh in-memory store
    pub fn in_memory(config: BoardConfig) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Context over a file store rooted at `config.storage_dir`
    pub fn with_file_store(config: BoardConfig) -> Self {
        let store = FileStore::new(config.storage_dir.clone());
        Self::new(config, Arc::new(store))
    }

    /// Route saves through a debounced background writer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_debounced_saves(mut self) -> Self {
        let writer = SaveWriter::spawn(
            self.gateway.clone(),
            self.config.save_debounce(),
            self.notifier.clone(),
        );
        self.writer = Some(writer);
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn gateway(&self) -> &StorageGateway {
        &self.gateway
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    // =========================================================================
    // State access
    // =========================================================================

    pub async fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().await
    }

    /// Clone of the current document and view mode
    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            document: state.document.clone(),
            view_mode: state.view_mode,
        }
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.state.read().await.view_mode
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Persist the current state, unless a load is in progress.
    ///
    /// Without a writer the save happens now and failures are returned as
    /// well as broadcast. With one, the snapshot is queued.
    pub async fn persist(&self) -> Result<()> {
        let snapshot = {
            let state = self.state.read().await;
            if state.loading {
                debug!("skipping save while loading");
                return Ok(());
            }
            Snapshot {
                document: state.document.clone(),
                view_mode: state.view_mode,
            }
        };

        match &self.writer {
            Some(writer) => {
                trace!("queueing save");
                writer.schedule(snapshot)
            }
            None => self.save_now(&snapshot).await,
        }
    }

    /// Write a snapshot directly, notifying on failure
    pub async fn save_now(&self, snapshot: &Snapshot) -> Result<()> {
        self.gateway.save_snapshot(snapshot).await.inspect_err(|e| {
            self.notifier.report("Could not save the board", e);
        })
    }

    /// Wait for any queued save to be written
    pub async fn flush(&self) -> Result<()> {
        match &self.writer {
            Some(writer) => writer.flush().await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::storage::BOARD_KEY;

    fn setup() -> (Arc<MemoryStore>, BoardContext) {
        let store = Arc::new(MemoryStore::new());
        let ctx = BoardContext::new(BoardConfig::default(), store.clone());
        (store, ctx)
    }

    #[tokio::test]
    async fn test_starts_with_default_board() {
        let (_store, ctx) = setup();
        let state = ctx.read().await;
        assert_eq!(state.document.columns.len(), 3);
        assert_eq!(state.view_mode, ViewMode::Normal);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_persist_writes_immediately() {
        let (store, ctx) = setup();
        ctx.persist().await.unwrap();
        assert!(store.get(BOARD_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_persist_skipped_while_loading() {
        let (store, ctx) = setup();
        ctx.set_loading(true).await;
        ctx.persist().await.unwrap();
        assert!(store.get(BOARD_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_save_notifies() {
        let ctx = BoardContext::new(BoardConfig::default(), Arc::new(MemoryStore::with_quota(10)));
        let mut notifications = ctx.subscribe();

        let err = ctx.persist().await.unwrap_err();
        assert!(matches!(err, BoardError::Storage { .. }));
        assert!(notifications.recv().await.unwrap().is_error());
        // in-memory state is untouched
        assert_eq!(ctx.read().await.document.columns.len(), 3);
    }

    #[tokio::test]
    async fn test_debounced_persist_needs_flush() {
        let store = Arc::new(MemoryStore::new());
        let config = BoardConfig {
            save_debounce_ms: 60_000,
            ..BoardConfig::default()
        };
        let ctx = BoardContext::new(config, store.clone()).with_debounced_saves();

        ctx.persist().await.unwrap();
        assert!(store.get(BOARD_KEY).await.unwrap().is_none());
        ctx.flush().await.unwrap();
        assert!(store.get(BOARD_KEY).await.unwrap().is_some());
    }
}
