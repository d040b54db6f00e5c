//! UpdateTask command

use crate::command::{committed, input_of};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{Task, TaskId};
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Update task content fields.
///
/// Only fields that are set are changed. Placement (column, order) is changed
/// with `MoveTask`, never here.
#[operation(verb = "update", noun = "task", description = "Update task properties")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New tag label
    #[serde(alias = "client")]
    pub tag: Option<String>,
    /// New tag color
    #[serde(alias = "clientColor", alias = "tagColor")]
    pub tag_color: Option<String>,
    /// New external reference
    pub reference: Option<String>,
}

impl UpdateTask {
    /// Create a new UpdateTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
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

    /// Apply the set fields. A blank color means the default color, the same
    /// as when the task was added.
    fn merge_into(&self, task: &mut Task, default_color: &str) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(tag) = &self.tag {
            task.tag = tag.clone();
        }
        if let Some(color) = &self.tag_color {
            task.tag_color = if color.is_empty() {
                default_color.to_string()
            } else {
                color.clone()
            };
        }
        if let Some(reference) = &self.reference {
            task.reference = reference.clone();
        }
        task.touch();
    }

    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        let default_color = &ctx.config().default_tag_color;
        let mut state = ctx.write().await;
        match state.document.find_task_mut(&self.id) {
            Some(task) => {
                self.merge_into(task, default_color);
                committed(&*task)
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let outcome = self.apply(ctx).await;
        ExecutionResult::from_mutation(self.op_string(), input_of(self), started, outcome)
    }
}
