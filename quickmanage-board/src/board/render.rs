//! RenderBoard command

use crate::command::query;
use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::{TaskFilter, Visibility};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::Deserialize;
use serde_json::{json, Value};

/// Columns to draw under the active view mode, with tasks filtered.
///
/// In presentation mode, tasks that have no placement yet are listed in the
/// first presentation column. Nothing here is stored.
#[operation(verb = "render", noun = "board", description = "Compute the columns to display for the active view")]
#[derive(Debug, Default, Deserialize)]
pub struct RenderBoard {
    /// Only tasks with exactly this tag
    pub tag: Option<String>,
    /// Hidden-flag filter: all, visible or hidden
    pub visibility: Option<Visibility>,
}

impl RenderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    fn filter(&self) -> TaskFilter {
        TaskFilter {
            tag: self.tag.clone(),
            visibility: self.visibility.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for RenderBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let state = ctx.read().await;
        let columns = state.document.render(state.view_mode, &self.filter());
        query(
            serde_json::to_value(&columns)
                .map(|columns| json!({ "viewMode": state.view_mode, "columns": columns }))
                .map_err(BoardError::from),
        )
    }
}
