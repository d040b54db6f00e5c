//! GetBoard command

use crate::command::query;
use crate::context::BoardContext;
use crate::error::BoardError;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::Deserialize;
use serde_json::{json, Value};

/// Get the full board state
#[operation(verb = "get", noun = "board", description = "Retrieve the document, view mode and loading flag")]
#[derive(Debug, Default, Deserialize)]
pub struct GetBoard;

impl GetBoard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let state = ctx.read().await;
        query(match serde_json::to_value(&state.document) {
            Ok(document) => Ok(json!({
                "document": document,
                "viewMode": state.view_mode,
                "loading": state.loading,
            })),
            Err(e) => Err(e.into()),
        })
    }
}
