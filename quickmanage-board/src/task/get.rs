//! GetTask command

use crate::command::query;
use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::TaskId;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::Deserialize;
use serde_json::Value;

/// Get a task by ID
#[operation(verb = "get", noun = "task", description = "Retrieve a task by ID")]
#[derive(Debug, Deserialize)]
pub struct GetTask {
    /// The task ID to retrieve
    pub id: TaskId,
}

impl GetTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let state = ctx.read().await;
        query(match state.document.find_task(&self.id) {
            Some(task) => serde_json::to_value(task).map_err(BoardError::from),
            None => Ok(Value::Null),
        })
    }
}
