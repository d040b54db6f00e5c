//! # quickmanage operations
//!
//! The `Operation` trait and its execution plumbing. A command is a struct
//! whose fields are its parameters; `#[operation]` supplies the metadata and
//! `Execute` supplies the behavior against some context type.
//!
//! ```ignore
//! use quickmanage_operations::*;
//!
//! #[operation(verb = "add", noun = "column", description = "Append a column")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddColumn {
//!     /// The column title
//!     pub title: String,
//! }
//!
//! #[async_trait]
//! impl Execute<BoardContext, BoardError> for AddColumn {
//!     async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
//!         // returns Logged for a committed mutation, Unlogged for a no-op
//!     }
//! }
//! ```

// Lets the `#[operation]` expansion name this crate from inside its own tests.
extern crate self as quickmanage_operations;

mod execution_result;
mod log;
mod operation;
mod parameter;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use parameter::ParamMeta;

pub use quickmanage_operations_macros::operation;

pub use async_trait::async_trait;
pub use serde_json::Value;
