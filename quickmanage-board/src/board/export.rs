//! ExportBoard command

use crate::command::query;
use crate::context::BoardContext;
use crate::error::BoardError;
use crate::transfer::export_file_name;
use chrono::Utc;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::Deserialize;
use serde_json::{json, Value};

/// Produce the export file name and document. Writing the file is left to
/// the caller.
#[operation(verb = "export", noun = "board", description = "Produce the board document for download")]
#[derive(Debug, Default, Deserialize)]
pub struct ExportBoard;

impl ExportBoard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ExportBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let file_name = export_file_name(&ctx.config().product_name, Utc::now().date_naive());
        let state = ctx.read().await;
        query(
            serde_json::to_value(&state.document)
                .map(|document| json!({ "fileName": file_name, "document": document }))
                .map_err(BoardError::from),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    #[tokio::test]
    async fn test_export_board() {
        let config = BoardConfig {
            product_name: "acme".into(),
            ..BoardConfig::default()
        };
        let ctx = BoardContext::in_memory(config);

        let result = ExportBoard::new().execute(&ctx).await;
        assert!(!result.should_log());
        let result = result.into_result().unwrap();

        let file_name = result["fileName"].as_str().unwrap();
        let expected = format!("acme-board-{}.json", Utc::now().format("%Y-%m-%d"));
        assert_eq!(file_name, expected);
        assert_eq!(result["document"]["columns"].as_array().unwrap().len(), 3);
    }
}
