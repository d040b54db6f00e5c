//! AddTask command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{ColumnId, Task, ViewMode};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Add a new task to a column.
///
/// In presentation mode `column_id` names a presentation column; the task is
/// stored at the end of the first canonical column and placed in the named
/// presentation column.
#[operation(verb = "add", noun = "task", description = "Create a new task in a column")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddTask {
    /// The column to add the task to
    pub column_id: ColumnId,
    /// The task title
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Free-form tag label
    #[serde(alias = "client")]
    pub tag: Option<String>,
    /// Tag color as #rrggbb; defaults to the configured color
    #[serde(alias = "clientColor", alias = "tagColor")]
    pub tag_color: Option<String>,
    /// External reference such as a ticket number or URL
    pub reference: Option<String>,
}

impl AddTask {
    /// Create a new AddTask command with just a column and title
    pub fn new(column_id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            title: title.into(),
            description: None,
            tag: None,
            tag_color: None,
            reference: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the tag color
    pub fn with_tag_color(mut self, color: impl Into<String>) -> Self {
        self.tag_color = Some(color.into());
        self
    }

    /// Set the reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    fn build(&self, default_color: &str) -> Task {
        let tag_color = self
            .tag_color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(default_color);
        Task::new(self.title.clone(), self.column_id.clone())
            .with_description(self.description.clone().unwrap_or_default())
            .with_tag(self.tag.clone().unwrap_or_default())
            .with_tag_color(tag_color)
            .with_reference(self.reference.clone().unwrap_or_default())
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let task = self.build(&ctx.config().default_tag_color);
        let mut state = ctx.write().await;
        let added = match state.view_mode {
            ViewMode::Normal => state.document.add_task(&self.column_id, task),
            ViewMode::Presentation => state.document.add_presented_task(&self.column_id, task),
        };
        match added {
            Some(task) => committed(task),
            None => {
                debug!(column = %self.column_id, "no such column for new task");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result
            .get("id")
            .and_then(Value::as_str)
            .map(|id| vec![id.to_string()])
            .unwrap_or_default()
    }
}
