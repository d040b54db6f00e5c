//! MoveColumn command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{swap_with_neighbor, ColumnId, Direction, ViewMode};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Swap a column with its left or right neighbour
#[operation(verb = "move", noun = "column", description = "Move a column one place left or right")]
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveColumn {
    /// The column ID to move
    pub id: ColumnId,
    /// Which neighbour to swap with
    pub direction: Direction,
}

impl MoveColumn {
    pub fn new(id: impl Into<ColumnId>, direction: Direction) -> Self {
        Self {
            id: id.into(),
            direction,
        }
    }

    pub fn left(id: impl Into<ColumnId>) -> Self {
        Self::new(id, Direction::Left)
    }

    pub fn right(id: impl Into<ColumnId>) -> Self {
        Self::new(id, Direction::Right)
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let mut state = ctx.write().await;
        match state.view_mode {
            ViewMode::Normal => {
                let columns = &mut state.document.columns;
                if !swap_with_neighbor(columns, &self.id, self.direction) {
                    return Ok(None);
                }
                match columns.iter().find(|c| c.id == self.id) {
                    Some(column) => committed(column),
                    None => Ok(None),
                }
            }
            ViewMode::Presentation => {
                let columns = state.document.presentation_mut();
                if !swap_with_neighbor(columns, &self.id, self.direction) {
                    return Ok(None);
                }
                match columns.iter().find(|c| c.id == self.id) {
                    Some(column) => committed(column),
                    None => Ok(None),
                }
            }
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
