//! ToggleViewMode command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::debug;

/// Switch between normal and presentation view.
///
/// Entering presentation view starts over with two empty presentation
/// columns. Canonical columns are never touched.
#[operation(verb = "toggle", noun = "view", description = "Switch between normal and presentation view")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ToggleViewMode;

impl ToggleViewMode {
    pub fn new() -> Self {
        Self
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        let next = state.view_mode.toggled();
        state.view_mode = next;
        if state.view_mode.is_presentation() {
            state.document.reset_presentation();
        }
        debug!(view_mode = %state.view_mode, "view mode changed");
        committed(&json!({ "viewMode": state.view_mode }))
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ToggleViewMode {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
