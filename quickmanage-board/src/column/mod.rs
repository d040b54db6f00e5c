//! Column commands
//!
//! All of these act on the column set of the active view: canonical columns
//! in normal mode, presentation columns in presentation mode.

mod add;
mod delete;
mod mv;
mod update;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use mv::MoveColumn;
pub use update::UpdateColumn;
