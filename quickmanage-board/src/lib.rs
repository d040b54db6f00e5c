//! Board state manager for a single-user kanban board
//!
//! This crate owns the board document (canonical columns of ordered tasks,
//! plus an optional presentation-view placement index), every mutation on
//! it, and its persistence to a string key-value store.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use quickmanage_board::{
//!     board::InitBoard, task::AddTask, BoardConfig, BoardContext, BoardOperationProcessor,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BoardConfig::load(&[])?;
//! let ctx = BoardContext::with_file_store(config);
//! let processor = BoardOperationProcessor::for_context(&ctx);
//!
//! processor.process(&InitBoard::new(), &ctx).await?;
//!
//! let todo = ctx.read().await.document.columns[0].id.clone();
//! let task = processor
//!     .process(&AddTask::new(todo, "Write release notes").with_tag("docs"), &ctx)
//!     .await?;
//! println!("Created task: {}", task["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Invariants
//!
//! - Task `order` within a column is always `0..n-1` after a mutation.
//! - No two columns in a set share an `order`; gaps after deletion are kept.
//! - Presentation columns hold task ids only; task content lives in the
//!   canonical columns, and a presentation move never changes `columnId`.
//!
//! ## Storage
//!
//! ```text
//! <storage_dir>/
//! ├── quickmanage_board.json       # the document
//! └── quickmanage_view_mode.json   # "normal" | "presentation"
//! ```

mod command;
mod config;
mod context;
mod error;
pub mod migrate;
pub mod notification;
pub mod palette;
mod processor;
pub mod storage;
pub mod transfer;
pub mod types;
mod writer;

// Command modules
pub mod board;
pub mod column;
pub mod comment;
pub mod task;

pub use config::{BoardConfig, ENV_PREFIX};
pub use context::{BoardContext, BoardState};
pub use error::{BoardError, Result};
pub use notification::{Notification, NotificationLevel, Notifier};
pub use processor::BoardOperationProcessor;
pub use writer::SaveWriter;

// Re-export operation plumbing so callers need only this crate
pub use quickmanage_operations::{Execute, ExecutionResult, LogEntry, Operation};
