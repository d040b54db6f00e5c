//! MoveTask command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{ColumnId, TaskId, ViewMode};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Move a task to an index in a column of the active view.
///
/// In normal mode the task changes canonical column and both columns are
/// renumbered. In presentation mode only the placement moves; the task's
/// `columnId` never changes.
#[operation(verb = "move", noun = "task", description = "Move a task to a column and index")]
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// The column the task is leaving
    pub from: ColumnId,
    /// The column the task is entering
    pub to: ColumnId,
    /// Index in the destination, clamped to its length
    #[serde(default)]
    pub index: usize,
}

impl MoveTask {
    pub fn new(
        id: impl Into<TaskId>,
        from: impl Into<ColumnId>,
        to: impl Into<ColumnId>,
        index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            index,
        }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        let moved = match state.view_mode {
            ViewMode::Normal => state
                .document
                .move_task(&self.id, &self.from, &self.to, self.index)
                .is_some(),
            ViewMode::Presentation => {
                state
                    .document
                    .move_placement(&self.id, &self.from, &self.to, self.index)
            }
        };
        if !moved {
            debug!(task = %self.id, from = %self.from, to = %self.to, "move did not apply");
            return Ok(None);
        }
        match state.document.find_task(&self.id) {
            Some(task) => committed(task),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
