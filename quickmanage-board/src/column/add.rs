//! AddColumn command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{next_order, Column, PresentationColumn, ViewMode};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Append a column to the active view
#[operation(verb = "add", noun = "column", description = "Append a column to the active view")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    /// The column title
    pub title: String,
}

impl AddColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        if self.title.trim().is_empty() {
            debug!("ignoring column with blank title");
            return Ok(None);
        }

        let mut state = ctx.write().await;
        match state.view_mode {
            ViewMode::Normal => {
                let column = Column::new(self.title.clone(), next_order(&state.document.columns));
                let result = committed(&column);
                state.document.columns.push(column);
                result
            }
            ViewMode::Presentation => {
                let columns = state.document.presentation_mut();
                let column = PresentationColumn::new(self.title.clone(), next_order(columns));
                let result = committed(&column);
                columns.push(column);
                result
            }
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
