//! AddComment command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::TaskId;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Add a comment to a task
#[operation(verb = "add", noun = "comment", description = "Add a comment to a task")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddComment {
    /// The task ID to comment on
    pub task_id: TaskId,
    /// The comment text
    pub text: String,
}

impl AddComment {
    pub fn new(task_id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            text: text.into(),
        }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        if self.text.trim().is_empty() {
            return Ok(None);
        }
        let mut state = ctx.write().await;
        match state.document.find_task_mut(&self.task_id) {
            Some(task) => committed(&task.push_comment(self.text.clone())),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddComment {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::task::AddTask;

    async fn setup() -> (BoardContext, TaskId) {
        let ctx = BoardContext::in_memory(BoardConfig::default());
        let col = ctx.read().await.document.columns[0].id.clone();
        let result = AddTask::new(col, "Discussed")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        (ctx, TaskId::from(result["id"].as_str().unwrap()))
    }

    #[tokio::test]
    async fn test_add_comments_in_order() {
        let (ctx, task_id) = setup().await;

        let first = AddComment::new(task_id.clone(), "First")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        AddComment::new(task_id.clone(), "Second")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(first["text"], "First");
        assert!(first["id"].is_string());

        let state = ctx.read().await;
        let task = state.document.find_task(&task_id).unwrap();
        let texts: Vec<&str> = task.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second"]);
        assert!(task.updated_at >= task.created_at);
    }

    #[tokio::test]
    async fn test_blank_text_is_noop() {
        let (ctx, task_id) = setup().await;
        let result = AddComment::new(task_id.clone(), "  ").execute(&ctx).await;
        assert!(!result.is_committed());
        assert!(ctx.read().await.document.find_task(&task_id).unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_task_is_noop() {
        let (ctx, _) = setup().await;
        assert!(!AddComment::new("missing", "hi").execute(&ctx).await.is_committed());
    }
}
