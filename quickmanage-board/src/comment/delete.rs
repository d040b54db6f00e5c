//! DeleteComment command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{CommentId, TaskId};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Delete a comment from a task
#[operation(verb = "delete", noun = "comment", description = "Delete a comment from a task")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteComment {
    /// The task owning the comment
    pub task_id: TaskId,
    /// The comment ID to delete
    pub id: CommentId,
}

impl DeleteComment {
    pub fn new(task_id: impl Into<TaskId>, id: impl Into<CommentId>) -> Self {
        Self {
            task_id: task_id.into(),
            id: id.into(),
        }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        let removed = state
            .document
            .find_task_mut(&self.task_id)
            .and_then(|task| task.remove_comment(&self.id));
        match removed {
            Some(comment) => committed(&comment),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteComment {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
