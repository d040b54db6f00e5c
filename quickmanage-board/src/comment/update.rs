//! UpdateComment command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{CommentId, TaskId};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Edit a comment's text
#[operation(verb = "update", noun = "comment", description = "Edit a comment on a task")]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateComment {
    /// The task owning the comment
    pub task_id: TaskId,
    /// The comment ID to edit
    pub id: CommentId,
    /// Replacement text
    pub text: String,
}

impl UpdateComment {
    pub fn new(
        task_id: impl Into<TaskId>,
        id: impl Into<CommentId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            id: id.into(),
            text: text.into(),
        }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        if self.text.trim().is_empty() {
            return Ok(None);
        }
        let mut state = ctx.write().await;
        let Some(task) = state.document.find_task_mut(&self.task_id) else {
            return Ok(None);
        };
        let Some(comment) = task.find_comment_mut(&self.id) else {
            return Ok(None);
        };
        comment.edit(self.text.clone());
        let result = committed(&*comment);
        task.touch();
        result
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateComment {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
