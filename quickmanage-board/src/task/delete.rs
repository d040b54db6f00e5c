//! DeleteTask command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::TaskId;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Delete a task; its presentation placements go with it
#[operation(verb = "delete", noun = "task", description = "Delete a task")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        match state.document.remove_task(&self.id) {
            Some(task) => committed(&task),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteTask {
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

    fn setup() -> BoardContext {
        BoardContext::in_memory(BoardConfig::default())
    }

    #[tokio::test]
    async fn test_delete_renumbers_remaining() {
        let ctx = setup();
        let col = ctx.read().await.document.columns[0].id.clone();
        let mut ids = Vec::new();
        for title in ["A", "B", "C"] {
            let result = AddTask::new(col.clone(), title)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            ids.push(TaskId::from(result["id"].as_str().unwrap()));
        }

        let result = DeleteTask::new(ids[0].clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["title"], "A");

        let state = ctx.read().await;
        let column = state.document.find_column(&col).unwrap();
        let pairs: Vec<(&str, usize)> = column
            .sorted_tasks()
            .iter()
            .map(|t| (t.title.as_str(), t.order))
            .collect();
        assert_eq!(pairs, vec![("B", 0), ("C", 1)]);
    }

    #[tokio::test]
    async fn test_unknown_task_is_noop() {
        let ctx = setup();
        let result = DeleteTask::new("missing").execute(&ctx).await;
        assert!(!result.is_committed());
        assert_eq!(result.into_result().unwrap(), Value::Null);
    }
}
