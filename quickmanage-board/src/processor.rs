//! Runs board commands, records activity, and persists committed changes

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use quickmanage_operations::{Execute, LogEntry};
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Drives commands against a `BoardContext`.
///
/// Every committed (logged) result triggers a save; no-ops and reads never
/// do. Log entries are kept newest first, up to `limit`.
#[derive(Debug)]
pub struct BoardOperationProcessor {
    activity: Mutex<VecDeque<LogEntry>>,
    limit: usize,
}

impl BoardOperationProcessor {
    pub fn new(limit: usize) -> Self {
        Self {
            activity: Mutex::new(VecDeque::new()),
            limit: limit.max(1),
        }
    }

    /// Processor sized from the context's config
    pub fn for_context(ctx: &BoardContext) -> Self {
        Self::new(ctx.config().activity_limit)
    }

    /// Execute `operation` and persist the board if it changed.
    ///
    /// When the save fails the change stays applied in memory; the storage
    /// error is returned and has already been broadcast.
    pub async fn process<O>(&self, operation: &O, ctx: &BoardContext) -> Result<Value>
    where
        O: Execute<BoardContext, BoardError>,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(entry) = log_entry {
            let failed = entry.is_error();
            if failed {
                warn!(op = %entry.op, duration_ms = entry.duration_ms, "operation failed");
            } else {
                info!(op = %entry.op, duration_ms = entry.duration_ms, "operation committed");
            }
            self.record(entry).await;
            if !failed {
                ctx.persist().await?;
            }
        }

        result
    }

    async fn record(&self, entry: LogEntry) {
        let mut activity = self.activity.lock().await;
        activity.push_front(entry);
        activity.truncate(self.limit);
    }

    /// Recorded entries, newest first
    pub async fn activity(&self) -> Vec<LogEntry> {
        self.activity.lock().await.iter().cloned().collect()
    }
}

impl Default for BoardOperationProcessor {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::AddColumn;
    use crate::config::BoardConfig;
    use crate::storage::{KeyValueStore, MemoryStore, BOARD_KEY};
    use crate::task::DeleteTask;
    use std::sync::Arc;

    fn setup() -> (Arc<MemoryStore>, BoardContext) {
        let store = Arc::new(MemoryStore::new());
        let ctx = BoardContext::new(BoardConfig::default(), store.clone());
        (store, ctx)
    }

    #[test_log::test(tokio::test)]
    async fn test_committed_change_is_saved_and_recorded() {
        let (store, ctx) = setup();
        let processor = BoardOperationProcessor::default();

        let result = processor
            .process(&AddColumn::new("Review"), &ctx)
            .await
            .unwrap();
        assert_eq!(result["title"], "Review");

        let stored = store.get(BOARD_KEY).await.unwrap().unwrap();
        assert!(stored.contains("Review"));
        let activity = processor.activity().await;
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].op, "add column");
    }

    #[tokio::test]
    async fn test_noop_is_not_saved() {
        let (store, ctx) = setup();
        let processor = BoardOperationProcessor::default();

        let result = processor
            .process(&DeleteTask::new("missing"), &ctx)
            .await
            .unwrap();
        assert_eq!(result, Value::Null);
        assert!(store.get(BOARD_KEY).await.unwrap().is_none());
        assert!(processor.activity().await.is_empty());
    }

    #[tokio::test]
    async fn test_activity_is_bounded_newest_first() {
        let (_store, ctx) = setup();
        let processor = BoardOperationProcessor::new(2);

        for title in ["A", "B", "C"] {
            processor.process(&AddColumn::new(title), &ctx).await.unwrap();
        }

        let activity = processor.activity().await;
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].output["title"], "C");
        assert_eq!(activity[1].output["title"], "B");
    }

    #[test_log::test(tokio::test)]
    async fn test_failed_save_keeps_change() {
        let store = Arc::new(MemoryStore::with_quota(10));
        let ctx = BoardContext::new(BoardConfig::default(), store);
        let processor = BoardOperationProcessor::default();

        let err = processor
            .process(&AddColumn::new("Kept"), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::Storage { .. }));
        assert_eq!(ctx.read().await.document.columns.len(), 4);
    }
}
