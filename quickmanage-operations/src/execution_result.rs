//! Execution result types for operations

use crate::LogEntry;
use serde_json::Value;
use std::fmt::Display;
use std::time::Instant;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: a mutation was committed and should be audited and persisted
/// - Unlogged: read-only queries and mutations that turned out to be no-ops
/// - Failed: errors (optionally logged)
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but changed nothing
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }

    /// True when a mutation was committed
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Logged { .. })
    }
}

impl<E: Display> ExecutionResult<Value, E> {
    /// Classify the outcome of a mutating command body.
    ///
    /// `Ok(Some(v))` is a committed change, `Ok(None)` a no-op that yields
    /// `null`, and `Err` a failure that still gets a log entry.
    pub fn from_mutation(
        op: impl Into<String>,
        input: Value,
        started: Instant,
        outcome: Result<Option<Value>, E>,
    ) -> Self {
        let duration_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(Some(value)) => Self::Logged {
                value: value.clone(),
                log_entry: LogEntry::new(op, input, value, duration_ms),
            },
            Ok(None) => Self::Unlogged { value: Value::Null },
            Err(error) => {
                let output = serde_json::json!({ "error": error.to_string() });
                Self::Failed {
                    error,
                    log_entry: Some(LogEntry::new(op, input, output, duration_ms)),
                }
            }
        }
    }
}
