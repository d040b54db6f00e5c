//! Column types: canonical Column and PresentationColumn placement

use super::ids::{ColumnId, TaskId};
use super::ordering::{insert_clamped, BoardColumn};
use super::task::Task;
use serde::{Deserialize, Serialize};

/// A canonical column. It owns its tasks exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub order: usize,
}

impl Column {
    /// Create an empty column with a fresh id
    pub fn new(title: impl Into<String>, order: usize) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            tasks: Vec::new(),
            order,
        }
    }

    /// Create an empty column with a known id
    pub fn with_id(id: impl Into<ColumnId>, title: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks: Vec::new(),
            order,
        }
    }

    /// Put tasks in display order and rewrite `order` as 0..n-1.
    ///
    /// Stored documents may list tasks out of display order; sorting first
    /// keeps insert indices meaningful to the caller, who sees sorted tasks.
    pub fn normalize_tasks(&mut self) {
        self.tasks.sort_by_key(|t| t.order);
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.order = index;
            task.column_id = self.id.clone();
        }
    }

    /// Position of a task in this column's vector
    pub fn task_index(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Append a task at the end and renumber. Returns the stored task.
    pub fn push_task(&mut self, task: Task) -> &Task {
        self.normalize_tasks();
        self.tasks.push(task);
        self.normalize_tasks();
        let index = self.tasks.len() - 1;
        &self.tasks[index]
    }

    /// Insert a task at `index` (clamped) and renumber. Returns the stored task.
    pub fn insert_task(&mut self, index: usize, task: Task) -> &Task {
        self.normalize_tasks();
        let index = insert_clamped(&mut self.tasks, index, task);
        self.normalize_tasks();
        &self.tasks[index]
    }

    /// Remove a task and renumber the remainder
    pub fn take_task(&mut self, id: &TaskId) -> Option<Task> {
        self.normalize_tasks();
        let index = self.task_index(id)?;
        let task = self.tasks.remove(index);
        self.normalize_tasks();
        Some(task)
    }

    /// Tasks sorted by `order`
    pub fn sorted_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by_key(|t| t.order);
        tasks
    }
}

impl BoardColumn for Column {
    fn id(&self) -> &ColumnId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// A presentation-view column. It only records placement: which canonical
/// tasks sit here, in what sequence. Position in `task_ids` is the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationColumn {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
    pub order: usize,
}

impl PresentationColumn {
    /// Create an empty presentation column with a fresh id
    pub fn new(title: impl Into<String>, order: usize) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            task_ids: Vec::new(),
            order,
        }
    }

    /// Whether the task is placed here
    pub fn contains(&self, id: &TaskId) -> bool {
        self.task_ids.contains(id)
    }

    /// Remove a task id; true if it was present
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.task_ids.len();
        self.task_ids.retain(|t| t != id);
        self.task_ids.len() != before
    }
}

impl BoardColumn for PresentationColumn {
    fn id(&self) -> &ColumnId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}
