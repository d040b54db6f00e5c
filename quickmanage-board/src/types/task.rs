//! Task types: Task, Comment

use super::ids::{ColumnId, CommentId, TaskId};
use crate::palette::DEFAULT_TAG_COLOR;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task/card on the board.
///
/// `column_id` is a lookup back-reference to the canonical column holding the
/// task; ownership lives in `Column::tasks`. `order` is the task's dense rank
/// inside that column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default = "default_tag_color")]
    pub tag_color: String,
    #[serde(default)]
    pub reference: String,
    pub column_id: ColumnId,
    pub order: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Discussion thread, oldest first
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Filter hint for the presentation layer; the task stays in its column
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

fn default_tag_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Task {
    /// Create a new task destined for `column_id`. The order is assigned when
    /// the task is inserted into its column.
    pub fn new(title: impl Into<String>, column_id: ColumnId) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            tag: String::new(),
            tag_color: default_tag_color(),
            reference: String::new(),
            column_id,
            order: 0,
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
            hidden: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tag label
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the tag color
    pub fn with_tag_color(mut self, color: impl Into<String>) -> Self {
        self.tag_color = color.into();
        self
    }

    /// Set the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Refresh `updated_at`, never moving it before `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Find a comment by ID
    pub fn find_comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    /// Find a comment by ID (mutable)
    pub fn find_comment_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| &c.id == id)
    }

    /// Append a comment and return a copy of it
    pub fn push_comment(&mut self, text: impl Into<String>) -> Comment {
        let comment = Comment::new(text);
        self.comments.push(comment.clone());
        self.touch();
        comment
    }

    /// Remove a comment by ID
    pub fn remove_comment(&mut self, id: &CommentId) -> Option<Comment> {
        let index = self.comments.iter().position(|c| &c.id == id)?;
        let removed = self.comments.remove(index);
        self.touch();
        Some(removed)
    }
}

/// A comment on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment
    pub fn new(text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            text: text.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the text and refresh `updated_at`
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.updated_at = Utc::now().max(self.created_at);
    }
}
