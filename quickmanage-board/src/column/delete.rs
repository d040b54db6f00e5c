//! DeleteColumn command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{ColumnId, ViewMode};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Delete a column.
///
/// In normal mode the column's tasks go with it. In presentation mode only
/// the placement is dropped; its tasks fall back to the first presentation
/// column. Remaining column orders are left as they are.
#[operation(verb = "delete", noun = "column", description = "Delete a column from the active view")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        match state.view_mode {
            ViewMode::Normal => match state.document.remove_column(&self.id) {
                Some(column) => committed(&column),
                None => Ok(None),
            },
            ViewMode::Presentation => {
                let columns = state.document.presentation_mut();
                match columns.iter().position(|c| c.id == self.id) {
                    Some(index) => committed(&columns.remove(index)),
                    None => Ok(None),
                }
            }
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
