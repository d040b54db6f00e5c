//! Shared plumbing for command bodies

use crate::error::{BoardError, Result};
use quickmanage_operations::ExecutionResult;
use serde::Serialize;
use serde_json::Value;

/// The command's parameters as recorded in its log entry
pub(crate) fn input_of<T: Serialize>(command: &T) -> Value {
    serde_json::to_value(command).unwrap_or(Value::Null)
}

/// A committed mutation's output
pub(crate) fn committed<T: Serialize>(entity: &T) -> Result<Option<Value>> {
    Ok(Some(serde_json::to_value(entity)?))
}

/// Wrap a read-only command's outcome; reads are never logged
pub(crate) fn query(outcome: Result<Value>) -> ExecutionResult<Value, BoardError> {
    match outcome {
        Ok(value) => ExecutionResult::Unlogged { value },
        Err(error) => ExecutionResult::Failed {
            error,
            log_entry: None,
        },
    }
}
