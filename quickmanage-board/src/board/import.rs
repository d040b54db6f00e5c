//! ImportBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::storage::Snapshot;
use crate::transfer::parse_document;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Replace the board with an imported document.
///
/// The text is parsed and saved before the in-memory board is swapped, so a
/// bad file or a failed save leaves everything as it was.
#[operation(verb = "import", noun = "board", description = "Replace the board with an imported document")]
#[derive(Debug, Deserialize, Serialize)]
pub struct ImportBoard {
    /// The file's text
    pub contents: String,
}

impl ImportBoard {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut document = parse_document(&self.contents, &ctx.config().default_tag_color)?;

        let mut state = ctx.write().await;
        if state.view_mode.is_presentation() && document.presentation_columns.is_none() {
            document.reset_presentation();
        }
        let snapshot = Snapshot {
            document,
            view_mode: state.view_mode,
        };
        ctx.gateway().save_snapshot(&snapshot).await?;

        let summary = json!({
            "columns": snapshot.document.columns.len(),
            "tasks": snapshot.document.tasks().count(),
        });
        state.document = snapshot.document;
        Ok(Some(summary))
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ImportBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        if let Err(e) = &outcome {
            ctx.notifier().report("Import failed", e);
        }
        // the log entry would otherwise carry the whole file
        let input = json!({ "bytes": self.contents.len() });
        ExecutionResult::from_mutation(self.op_string(), input, started, outcome)
    }
}
