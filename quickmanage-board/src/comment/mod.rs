//! Comment commands

mod add;
mod delete;
mod update;

pub use add::AddComment;
pub use delete::DeleteComment;
pub use update::UpdateComment;
