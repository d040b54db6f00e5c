//! InitBoard command

use crate::command::query;
use crate::context::BoardContext;
use crate::error::BoardError;
use crate::migrate::MigrationStats;
use crate::types::Document;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Load the stored board, or start the default one.
///
/// Saves are suppressed until the load finishes, and the load itself is not
/// saved back.
#[operation(verb = "init", noun = "board", description = "Load the stored board or create the default one")]
#[derive(Debug, Default, Deserialize)]
pub struct InitBoard;

impl InitBoard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for InitBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        ctx.set_loading(true).await;

        let loaded = ctx.gateway().load_document().await;
        let view_mode = ctx.gateway().load_view_mode().await;
        let restored = loaded.is_some();
        let (mut document, stats) =
            loaded.unwrap_or_else(|| (Document::default_board(), MigrationStats::default()));
        if view_mode.is_presentation() && document.presentation_columns.is_none() {
            document.reset_presentation();
        }

        let mut state = ctx.write().await;
        state.document = document;
        state.view_mode = view_mode;
        state.loading = false;

        if restored {
            info!(columns = state.document.columns.len(), %view_mode, "restored board");
        } else {
            debug!("no stored board, starting with defaults");
        }

        query(Ok(json!({
            "restored": restored,
            "viewMode": view_mode,
            "columns": state.document.columns.len(),
            "migrated": stats,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::storage::{KeyValueStore, MemoryStore, BOARD_KEY, VIEW_MODE_KEY};
    use crate::types::ViewMode;
    use std::sync::Arc;

    fn setup() -> (Arc<MemoryStore>, BoardContext) {
        let store = Arc::new(MemoryStore::new());
        let ctx = BoardContext::new(BoardConfig::default(), store.clone());
        (store, ctx)
    }

    #[tokio::test]
    async fn test_init_without_stored_board() {
        let (store, ctx) = setup();

        let result = InitBoard::new().execute(&ctx).await;
        assert!(!result.should_log());
        let result = result.into_result().unwrap();
        assert_eq!(result["restored"], false);
        assert_eq!(result["viewMode"], "normal");

        let state = ctx.read().await;
        let titles: Vec<&str> = state.document.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To do", "In progress", "Done"]);
        assert!(!state.loading);
        // loading does not write
        assert!(store.get(BOARD_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_init_restores_board_and_view_mode() {
        let (store, ctx) = setup();
        let mut document = Document::default_board();
        document.columns[0].title = "Inbox".into();
        store
            .set(BOARD_KEY, &serde_json::to_string(&document).unwrap())
            .await
            .unwrap();
        store.set(VIEW_MODE_KEY, "\"presentation\"").await.unwrap();

        let result = InitBoard::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["restored"], true);

        let state = ctx.read().await;
        assert_eq!(state.document.columns[0].title, "Inbox");
        assert_eq!(state.view_mode, ViewMode::Presentation);
        assert_eq!(state.document.presentation().len(), 2);
    }

    #[tokio::test]
    async fn test_init_migrates_legacy_tasks() {
        let (store, ctx) = setup();
        let legacy = json!({"columns": [{
            "id": "c1", "title": "Old", "order": 0,
            "tasks": [{
                "id": "t1", "title": "Legacy", "client": "Initech",
                "columnId": "c1", "order": 0,
                "createdAt": "2023-05-01T10:00:00Z", "updatedAt": "2023-05-01T10:00:00Z"
            }]
        }]});
        store.set(BOARD_KEY, &legacy.to_string()).await.unwrap();

        let result = InitBoard::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["migrated"]["tagsFromClient"], 1);
        assert_eq!(result["migrated"]["colorsDefaulted"], 1);

        let state = ctx.read().await;
        let task = &state.document.columns[0].tasks[0];
        assert_eq!(task.tag, "Initech");
        assert_eq!(task.tag_color, "#f87171");
    }

    #[tokio::test]
    async fn test_init_with_corrupt_store_falls_back() {
        let (store, ctx) = setup();
        store.set(BOARD_KEY, "{{{").await.unwrap();

        let result = InitBoard::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["restored"], false);
        assert_eq!(ctx.read().await.document.columns.len(), 3);
    }
}
