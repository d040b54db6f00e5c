//! UpdateColumn command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{ColumnId, ViewMode};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Rename a column
#[operation(verb = "update", noun = "column", description = "Rename a column in the active view")]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateColumn {
    /// The column ID to rename
    pub id: ColumnId,
    /// New column title
    pub title: String,
}

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        match state.view_mode {
            ViewMode::Normal => match state.document.find_column_mut(&self.id) {
                Some(column) => {
                    column.title = self.title.clone();
                    committed(&*column)
                }
                None => Ok(None),
            },
            ViewMode::Presentation => {
                let column = state
                    .document
                    .presentation_mut()
                    .iter_mut()
                    .find(|c| c.id == self.id);
                match column {
                    Some(column) => {
                        column.title = self.title.clone();
                        committed(&*column)
                    }
                    None => Ok(None),
                }
            }
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
