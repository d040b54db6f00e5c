//! ClearBoard command

use crate::command::input_of;
use crate::context::{BoardContext, BoardState};
use crate::error::{BoardError, Result};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Erase the stored board and start over with the default one in normal view
#[operation(verb = "clear", noun = "board", description = "Erase the stored board and reset to defaults")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClearBoard;

impl ClearBoard {
    pub fn new() -> Self {
        Self
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        ctx.gateway().clear().await?;
        *state = BoardState::default();
        info!("board cleared");
        Ok(Some(json!({
            "columns": state.document.columns.len(),
            "viewMode": state.view_mode,
        })))
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ClearBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        if let Err(e) = &outcome {
            ctx.notifier().report("Could not clear the board", e);
        }
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
