//! ToggleTaskVisibility command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::TaskId;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Flip a task's `hidden` flag. The task stays in its column; filters decide
/// whether to show it.
#[operation(verb = "toggle", noun = "visibility", description = "Hide or show a task")]
#[derive(Debug, Deserialize, Serialize)]
pub struct ToggleTaskVisibility {
    /// The task ID to toggle
    pub id: TaskId,
}

impl ToggleTaskVisibility {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        match state.document.find_task_mut(&self.id) {
            Some(task) => {
                task.hidden = !task.hidden;
                committed(&*task)
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ToggleTaskVisibility {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
