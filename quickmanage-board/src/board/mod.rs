//! Board commands: loading, view mode, derived views, and transfer

mod clear;
mod export;
mod get;
mod import;
mod init;
mod render;
mod tags;
mod view;

pub use clear::ClearBoard;
pub use export::ExportBoard;
pub use get::GetBoard;
pub use import::ImportBoard;
pub use init::InitBoard;
pub use render::RenderBoard;
pub use tags::ListTags;
pub use view::ToggleViewMode;
