//! The board document: canonical columns plus the optional presentation
//! placement index, and the structural mutations over them.

use super::column::{Column, PresentationColumn};
use super::ids::{ColumnId, TaskId};
use super::ordering::{indices_by_order, insert_clamped};
use super::task::Task;
use super::view::{RenderedColumn, TagInfo, TaskFilter, ViewMode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Titles of the columns a brand new board starts with
pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["To do", "In progress", "Done"];

/// Titles of the columns presentation mode starts with
pub const PRESENTATION_COLUMN_TITLES: [&str; 2] = ["Unreviewed pending", "Reviewed pending"];

/// The full persisted board state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Canonical columns; the only source of task content
    pub columns: Vec<Column>,
    /// Presentation view placement, absent until first used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_columns: Option<Vec<PresentationColumn>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::default_board()
    }
}

impl Document {
    /// Three empty columns, orders 0, 1, 2
    pub fn default_board() -> Self {
        Self {
            columns: DEFAULT_COLUMN_TITLES
                .iter()
                .enumerate()
                .map(|(order, title)| Column::new(*title, order))
                .collect(),
            presentation_columns: None,
        }
    }

    // =========================================================================
    // Canonical lookups
    // =========================================================================

    /// Canonical columns sorted by order
    pub fn columns_by_order(&self) -> Vec<&Column> {
        indices_by_order(&self.columns)
            .into_iter()
            .map(|i| &self.columns[i])
            .collect()
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn find_column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    /// The leftmost canonical column
    pub fn first_column_by_order(&self) -> Option<&Column> {
        self.columns.iter().min_by_key(|c| c.order)
    }

    /// Every canonical task, in no particular order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks().find(|t| &t.id == id)
    }

    pub fn find_task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.tasks.iter_mut())
            .find(|t| &t.id == id)
    }

    // =========================================================================
    // Canonical mutations
    // =========================================================================

    /// Append `task` to the end of a canonical column.
    pub fn add_task(&mut self, column_id: &ColumnId, mut task: Task) -> Option<&Task> {
        let column = self.find_column_mut(column_id)?;
        task.column_id = column.id.clone();
        Some(column.push_task(task))
    }

    /// Remove a task from whichever canonical column holds it.
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let removed = self.columns.iter_mut().find_map(|c| c.take_task(id))?;
        self.unplace(&HashSet::from([id.clone()]));
        Some(removed)
    }

    /// Move a canonical task to `index` of `dest`, renumbering both columns.
    ///
    /// No-op unless `source` holds the task and `dest` exists.
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        source: &ColumnId,
        dest: &ColumnId,
        index: usize,
    ) -> Option<&Task> {
        if self.find_column(dest).is_none() {
            return None;
        }
        let mut task = self.find_column_mut(source)?.take_task(task_id)?;
        task.touch();
        let dest_column = self.find_column_mut(dest)?;
        Some(dest_column.insert_task(index, task))
    }

    /// Remove a canonical column and every task in it.
    pub fn remove_column(&mut self, id: &ColumnId) -> Option<Column> {
        let index = self.columns.iter().position(|c| &c.id == id)?;
        let column = self.columns.remove(index);
        let ids: HashSet<TaskId> = column.tasks.iter().map(|t| t.id.clone()).collect();
        self.unplace(&ids);
        Some(column)
    }

    // =========================================================================
    // Presentation placement
    // =========================================================================

    /// Presentation columns, empty when none were ever created
    pub fn presentation(&self) -> &[PresentationColumn] {
        self.presentation_columns.as_deref().unwrap_or(&[])
    }

    /// Presentation columns, created empty on first use
    pub fn presentation_mut(&mut self) -> &mut Vec<PresentationColumn> {
        self.presentation_columns.get_or_insert_with(Vec::new)
    }

    /// Replace the presentation set with the two starting columns
    pub fn reset_presentation(&mut self) {
        self.presentation_columns = Some(
            PRESENTATION_COLUMN_TITLES
                .iter()
                .enumerate()
                .map(|(order, title)| PresentationColumn::new(*title, order))
                .collect(),
        );
    }

    pub fn find_presentation_column(&self, id: &ColumnId) -> Option<&PresentationColumn> {
        self.presentation().iter().find(|c| &c.id == id)
    }

    fn find_presentation_column_mut(&mut self, id: &ColumnId) -> Option<&mut PresentationColumn> {
        self.presentation_columns
            .as_mut()?
            .iter_mut()
            .find(|c| &c.id == id)
    }

    /// Leftmost presentation column; unplaced tasks are shown here
    fn inbox_id(&self) -> Option<&ColumnId> {
        self.presentation().iter().min_by_key(|c| c.order).map(|c| &c.id)
    }

    fn is_placed(&self, id: &TaskId) -> bool {
        self.presentation().iter().any(|c| c.contains(id))
    }

    /// Create a task from presentation mode.
    ///
    /// The task's canonical home is the first normal column by order; its
    /// placement is appended to the presentation column `column_id`.
    pub fn add_presented_task(&mut self, column_id: &ColumnId, task: Task) -> Option<&Task> {
        self.find_presentation_column(column_id)?;
        let home = self.first_column_by_order()?.id.clone();
        let task_id = task.id.clone();
        self.add_task(&home, task)?;
        self.find_presentation_column_mut(column_id)?
            .task_ids
            .push(task_id.clone());
        self.find_task(&task_id)
    }

    /// Move a placement between presentation columns. Canonical data is
    /// untouched.
    ///
    /// A task that is placed nowhere is shown in the inbox column, so it may
    /// be dragged out of there as well. An index into the inbox counts the
    /// unplaced tasks drawn after its placed ones.
    pub fn move_placement(
        &mut self,
        task_id: &TaskId,
        source: &ColumnId,
        dest: &ColumnId,
        index: usize,
    ) -> bool {
        if self.find_task(task_id).is_none() || self.find_presentation_column(dest).is_none() {
            return false;
        }
        let Some(source_column) = self.find_presentation_column(source) else {
            return false;
        };
        let placed_in_source = source_column.contains(task_id);
        let shown_in_inbox = !self.is_placed(task_id) && self.inbox_id() == Some(source);
        if !placed_in_source && !shown_in_inbox {
            return false;
        }

        if let Some(column) = self.find_presentation_column_mut(source) {
            column.remove(task_id);
        }
        if self.inbox_id() == Some(dest) {
            self.settle_inbox(task_id);
        }
        match self.find_presentation_column_mut(dest) {
            Some(column) => {
                insert_clamped(&mut column.task_ids, index, task_id.clone());
                true
            }
            None => false,
        }
    }

    /// Make the inbox's stored ids match what `render` shows in it, so an
    /// index into the drawn column is the same index into `task_ids`.
    ///
    /// Dangling ids are dropped and every unplaced task except `moving` is
    /// placed at the end in display order.
    fn settle_inbox(&mut self, moving: &TaskId) {
        let known: HashSet<TaskId> = self.tasks().map(|t| t.id.clone()).collect();
        let unplaced: Vec<TaskId> = self
            .filtered_tasks(&TaskFilter::default())
            .into_iter()
            .filter(|t| &t.id != moving && !self.is_placed(&t.id))
            .map(|t| t.id.clone())
            .collect();
        let Some(inbox) = self.inbox_id().cloned() else {
            return;
        };
        if let Some(column) = self.find_presentation_column_mut(&inbox) {
            column.task_ids.retain(|id| known.contains(id));
            column.task_ids.extend(unplaced);
        }
    }

    /// Drop the given ids from every presentation placement
    fn unplace(&mut self, ids: &HashSet<TaskId>) {
        if let Some(columns) = self.presentation_columns.as_mut() {
            for column in columns {
                column.task_ids.retain(|id| !ids.contains(id));
            }
        }
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Canonical tasks passing `filter`, in display order
    pub fn filtered_tasks(&self, filter: &TaskFilter) -> Vec<&Task> {
        self.columns_by_order()
            .into_iter()
            .flat_map(|c| c.sorted_tasks())
            .filter(|t| filter.matches(t))
            .collect()
    }

    /// Columns to draw for `mode`, never persisted.
    pub fn render(&self, mode: ViewMode, filter: &TaskFilter) -> Vec<RenderedColumn> {
        match mode {
            ViewMode::Normal => self
                .columns_by_order()
                .into_iter()
                .map(|column| RenderedColumn {
                    id: column.id.clone(),
                    title: column.title.clone(),
                    order: column.order,
                    tasks: column
                        .sorted_tasks()
                        .into_iter()
                        .filter(|t| filter.matches(t))
                        .cloned()
                        .collect(),
                })
                .collect(),
            ViewMode::Presentation => self.render_presentation(filter),
        }
    }

    fn render_presentation(&self, filter: &TaskFilter) -> Vec<RenderedColumn> {
        let columns = self.presentation();
        let mut rendered: Vec<RenderedColumn> = indices_by_order(columns)
            .into_iter()
            .map(|i| {
                let column = &columns[i];
                RenderedColumn {
                    id: column.id.clone(),
                    title: column.title.clone(),
                    order: column.order,
                    tasks: column
                        .task_ids
                        .iter()
                        .filter_map(|id| self.find_task(id))
                        .filter(|t| filter.matches(t))
                        .cloned()
                        .collect(),
                }
            })
            .collect();

        if let Some(inbox) = rendered.first_mut() {
            let unplaced = self
                .filtered_tasks(filter)
                .into_iter()
                .filter(|t| !self.is_placed(&t.id))
                .cloned();
            inbox.tasks.extend(unplaced);
        }
        rendered
    }

    /// Distinct non-empty tags with their color, sorted by tag. The first
    /// task in display order decides the color.
    pub fn tags(&self) -> Vec<TagInfo> {
        let mut tags: BTreeMap<&str, &str> = BTreeMap::new();
        for task in self.filtered_tasks(&TaskFilter::default()) {
            if !task.tag.is_empty() {
                tags.entry(task.tag.as_str()).or_insert(task.tag_color.as_str());
            }
        }
        tags.into_iter()
            .map(|(tag, color)| TagInfo {
                tag: tag.to_string(),
                color: color.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Visibility;

    fn board() -> (Document, ColumnId, ColumnId) {
        let doc = Document::default_board();
        let first = doc.columns[0].id.clone();
        let second = doc.columns[1].id.clone();
        (doc, first, second)
    }

    fn add(doc: &mut Document, column: &ColumnId, title: &str) -> TaskId {
        let task = Task::new(title, column.clone());
        doc.add_task(column, task).unwrap().id.clone()
    }

    fn titles(doc: &Document, column: &ColumnId) -> Vec<String> {
        doc.find_column(column)
            .unwrap()
            .sorted_tasks()
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn test_default_board() {
        let doc = Document::default_board();
        let titles: Vec<_> = doc.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To do", "In progress", "Done"]);
        assert_eq!(
            doc.columns.iter().map(|c| c.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(doc.presentation_columns.is_none());
    }

    #[test]
    fn test_add_task_to_unknown_column_is_noop() {
        let (mut doc, _, _) = board();
        let before = doc.clone();
        assert!(doc
            .add_task(&ColumnId::from("ghost"), Task::new("A", ColumnId::from("ghost")))
            .is_none());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_move_between_columns() {
        let (mut doc, first, second) = board();
        let a = add(&mut doc, &first, "A");
        add(&mut doc, &first, "B");

        let moved = doc.move_task(&a, &first, &second, 0).unwrap();
        assert_eq!(moved.column_id, second);
        assert_eq!(moved.order, 0);
        assert_eq!(titles(&doc, &first), vec!["B"]);
        assert_eq!(titles(&doc, &second), vec!["A"]);
        assert_eq!(doc.find_column(&first).unwrap().tasks[0].order, 0);
    }

    #[test]
    fn test_move_within_column() {
        let (mut doc, first, _) = board();
        let a = add(&mut doc, &first, "A");
        add(&mut doc, &first, "B");
        add(&mut doc, &first, "C");

        doc.move_task(&a, &first, &first, 2).unwrap();
        assert_eq!(titles(&doc, &first), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_move_to_unknown_destination_keeps_task() {
        let (mut doc, first, _) = board();
        let a = add(&mut doc, &first, "A");
        assert!(doc.move_task(&a, &first, &ColumnId::from("ghost"), 0).is_none());
        assert_eq!(titles(&doc, &first), vec!["A"]);
    }

    #[test]
    fn test_move_from_wrong_source_is_noop() {
        let (mut doc, first, second) = board();
        let a = add(&mut doc, &first, "A");
        assert!(doc.move_task(&a, &second, &first, 0).is_none());
        assert_eq!(doc.find_task(&a).unwrap().column_id, first);
    }

    #[test]
    fn test_remove_column_prunes_placements() {
        let (mut doc, first, _) = board();
        let a = add(&mut doc, &first, "A");
        doc.reset_presentation();
        let inbox = doc.presentation()[0].id.clone();
        doc.presentation_mut()[0].task_ids.push(a.clone());

        doc.remove_column(&first).unwrap();
        assert!(doc.find_task(&a).is_none());
        assert!(doc.find_presentation_column(&inbox).unwrap().task_ids.is_empty());
    }

    #[test]
    fn test_presented_task_has_canonical_home() {
        let (mut doc, first, _) = board();
        doc.reset_presentation();
        let reviewed = doc.presentation()[1].id.clone();

        let task = Task::new("From presentation", reviewed.clone());
        let id = doc.add_presented_task(&reviewed, task).unwrap().id.clone();

        assert_eq!(doc.find_task(&id).unwrap().column_id, first);
        assert_eq!(titles(&doc, &first), vec!["From presentation"]);
        assert!(doc.find_presentation_column(&reviewed).unwrap().contains(&id));
    }

    #[test]
    fn test_move_placement_leaves_canonical_alone() {
        let (mut doc, first, _) = board();
        let a = add(&mut doc, &first, "A");
        doc.reset_presentation();
        let inbox = doc.presentation()[0].id.clone();
        let reviewed = doc.presentation()[1].id.clone();
        let before = doc.columns.clone();

        // unplaced task shown in the inbox can be dragged out of it
        assert!(doc.move_placement(&a, &inbox, &reviewed, 0));
        assert_eq!(doc.columns, before);
        assert!(doc.find_presentation_column(&reviewed).unwrap().contains(&a));

        // it is no longer in the inbox, so dragging from there is a no-op
        assert!(!doc.move_placement(&a, &inbox, &reviewed, 0));

        assert!(doc.move_placement(&a, &reviewed, &inbox, 5));
        assert!(doc.find_presentation_column(&inbox).unwrap().contains(&a));
        assert!(!doc.find_presentation_column(&reviewed).unwrap().contains(&a));
    }

    #[test]
    fn test_drop_index_in_inbox_counts_unplaced_tasks() {
        let (mut doc, first, _) = board();
        let placed = add(&mut doc, &first, "Placed");
        let a = add(&mut doc, &first, "A");
        let b = add(&mut doc, &first, "B");
        doc.reset_presentation();
        let inbox = doc.presentation()[0].id.clone();
        doc.presentation_mut()[0].task_ids.push(TaskId::from("dangling"));
        doc.presentation_mut()[0].task_ids.push(placed.clone());

        let drawn = |doc: &Document| -> Vec<TaskId> {
            doc.render(ViewMode::Presentation, &TaskFilter::default())[0]
                .tasks
                .iter()
                .map(|t| t.id.clone())
                .collect()
        };
        assert_eq!(drawn(&doc), vec![placed.clone(), a.clone(), b.clone()]);

        // drop A after B, as drawn
        assert!(doc.move_placement(&a, &inbox, &inbox, 2));
        assert_eq!(drawn(&doc), vec![placed.clone(), b.clone(), a.clone()]);
        assert_eq!(
            doc.find_presentation_column(&inbox).unwrap().task_ids,
            vec![placed, b, a]
        );
    }

    #[test]
    fn test_render_presentation_skips_dangling_and_fills_inbox() {
        let (mut doc, first, _) = board();
        let a = add(&mut doc, &first, "A");
        let b = add(&mut doc, &first, "B");
        doc.reset_presentation();
        doc.presentation_mut()[1].task_ids.push(b.clone());
        doc.presentation_mut()[1].task_ids.push(TaskId::from("dangling"));

        let rendered = doc.render(ViewMode::Presentation, &TaskFilter::default());
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].title, "Unreviewed pending");
        assert_eq!(rendered[0].tasks.len(), 1);
        assert_eq!(rendered[0].tasks[0].id, a);
        assert_eq!(rendered[1].tasks.len(), 1);
        assert_eq!(rendered[1].tasks[0].id, b);
    }

    #[test]
    fn test_render_normal_filters() {
        let (mut doc, first, _) = board();
        let a = add(&mut doc, &first, "A");
        add(&mut doc, &first, "B");
        doc.find_task_mut(&a).unwrap().hidden = true;

        let filter = TaskFilter {
            tag: None,
            visibility: Visibility::Visible,
        };
        let rendered = doc.render(ViewMode::Normal, &filter);
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0].tasks.len(), 1);
        assert_eq!(rendered[0].tasks[0].title, "B");
    }

    #[test]
    fn test_tags_first_color_wins() {
        let (mut doc, first, second) = board();
        let a = add(&mut doc, &first, "A");
        let b = add(&mut doc, &second, "B");
        let c = add(&mut doc, &second, "C");
        for (id, tag, color) in [(&a, "bug", "#f87171"), (&b, "bug", "#60a5fa"), (&c, "api", "#34d399")] {
            let task = doc.find_task_mut(id).unwrap();
            task.tag = tag.into();
            task.tag_color = color.into();
        }

        let tags = doc.tags();
        assert_eq!(
            tags,
            vec![
                TagInfo { tag: "api".into(), color: "#34d399".into() },
                TagInfo { tag: "bug".into(), color: "#f87171".into() },
            ]
        );
    }

    #[test]
    fn test_document_json_shape() {
        let doc = Document::default_board();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("columns").is_some());
        assert!(json.get("presentationColumns").is_none());
    }
}
