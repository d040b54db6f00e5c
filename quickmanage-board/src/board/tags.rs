//! ListTags command

use crate::command::query;
use crate::context::BoardContext;
use crate::error::BoardError;
use quickmanage_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::Deserialize;
use serde_json::Value;

/// Distinct tags in use, for the tag filter
#[operation(verb = "list", noun = "tags", description = "List distinct tags with their colors")]
#[derive(Debug, Default, Deserialize)]
pub struct ListTags;

impl ListTags {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListTags {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let tags = ctx.read().await.document.tags();
        query(serde_json::to_value(tags).map_err(BoardError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::task::AddTask;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_tags() {
        let ctx = BoardContext::in_memory(BoardConfig::default());
        let col = ctx.read().await.document.columns[0].id.clone();
        for (tag, color) in [("web", "#22d3ee"), ("", "#fbbf24"), ("api", "#a3e635"), ("web", "#e879f9")] {
            AddTask::new(col.clone(), "t")
                .with_tag(tag)
                .with_tag_color(color)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }

        let result = ListTags::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(
            result,
            json!([
                {"tag": "api", "color": "#a3e635"},
                {"tag": "web", "color": "#22d3ee"},
            ])
        );
    }
}
