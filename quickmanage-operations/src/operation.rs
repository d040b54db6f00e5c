//! The `Operation` and `Execute` traits

use crate::{ExecutionResult, ParamMeta};
use async_trait::async_trait;
use serde_json::Value;

/// Static metadata every command carries.
///
/// Normally implemented by `#[operation(...)]` rather than by hand.
pub trait Operation {
    /// The action, e.g. "add", "move"
    fn verb(&self) -> &'static str;

    /// The target, e.g. "task", "column"
    fn noun(&self) -> &'static str;

    /// Human readable summary
    fn description(&self) -> &'static str;

    /// Parameters derived from the struct's fields
    fn parameters(&self) -> &'static [ParamMeta];

    /// Canonical op string used in log entries, e.g. "move task"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run an operation against a context.
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Execute the operation.
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;

    /// Ids of the entities a successful result touched
    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        Vec::new()
    }
}
