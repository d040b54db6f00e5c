//! Core types for the board state manager

mod column;
mod document;
mod ids;
mod ordering;
mod task;
mod view;

pub use column::{Column, PresentationColumn};
pub use document::{Document, DEFAULT_COLUMN_TITLES, PRESENTATION_COLUMN_TITLES};
pub use ids::{ColumnId, CommentId, TaskId};
pub use ordering::{
    indices_by_order, insert_clamped, next_order, swap_with_neighbor, BoardColumn, Direction,
};
pub use task::{Comment, Task};
pub use view::{RenderedColumn, TagInfo, TaskFilter, ViewMode, Visibility};
