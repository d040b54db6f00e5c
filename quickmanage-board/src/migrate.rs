//! Parsing and legacy-field migration for stored and imported documents.
//!
//! Older boards used `client`/`clientColor` for what is now
//! `tag`/`tagColor`, and older presentation columns embedded full task
//! objects instead of ids. Both are rewritten on the raw JSON before the
//! typed parse, so the rest of the crate only sees the current shape.

use crate::error::{BoardError, Result};
use crate::types::Document;
use serde::Serialize;
use serde_json::{Map, Value};

/// Counts of fields rewritten by `migrate_value`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStats {
    pub tags_from_client: usize,
    pub colors_from_client: usize,
    pub colors_defaulted: usize,
    pub column_refs_repaired: usize,
    pub placements_converted: usize,
}

impl MigrationStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse document text, migrating legacy fields.
///
/// The text must be a JSON object with a `columns` array.
pub fn parse_document(text: &str, default_tag_color: &str) -> Result<(Document, MigrationStats)> {
    let mut value: Value = serde_json::from_str(text)
        .map_err(|e| BoardError::invalid_document(format!("not valid JSON: {e}")))?;
    if !value.get("columns").is_some_and(Value::is_array) {
        return Err(BoardError::invalid_document("expected a 'columns' array"));
    }

    let stats = migrate_value(&mut value, default_tag_color);
    let document = serde_json::from_value(value)
        .map_err(|e| BoardError::invalid_document(e.to_string()))?;
    Ok((document, stats))
}

/// Rewrite legacy fields of a raw document in place
pub fn migrate_value(document: &mut Value, default_tag_color: &str) -> MigrationStats {
    let mut stats = MigrationStats::default();

    if let Some(columns) = document.get_mut("columns").and_then(Value::as_array_mut) {
        for column in columns.iter_mut().filter_map(Value::as_object_mut) {
            let column_id = column.get("id").cloned();
            let Some(tasks) = column.get_mut("tasks").and_then(Value::as_array_mut) else {
                continue;
            };
            for task in tasks.iter_mut().filter_map(Value::as_object_mut) {
                migrate_task(task, default_tag_color, &mut stats);
                if !task.contains_key("columnId") {
                    if let Some(id) = &column_id {
                        task.insert("columnId".into(), id.clone());
                        stats.column_refs_repaired += 1;
                    }
                }
            }
        }
    }

    if let Some(columns) = document
        .get_mut("presentationColumns")
        .and_then(Value::as_array_mut)
    {
        for column in columns.iter_mut().filter_map(Value::as_object_mut) {
            if convert_placement(column) {
                stats.placements_converted += 1;
            }
        }
    }

    stats
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn migrate_task(task: &mut Map<String, Value>, default_tag_color: &str, stats: &mut MigrationStats) {
    let client = task.remove("client");
    if is_blank(task.get("tag")) && !is_blank(client.as_ref()) {
        if let Some(client) = client {
            task.insert("tag".into(), client);
            stats.tags_from_client += 1;
        }
    }

    let client_color = task.remove("clientColor");
    if is_blank(task.get("tagColor")) {
        match client_color {
            Some(color) if !is_blank(Some(&color)) => {
                task.insert("tagColor".into(), color);
                stats.colors_from_client += 1;
            }
            _ => {
                task.insert("tagColor".into(), Value::from(default_tag_color));
                stats.colors_defaulted += 1;
            }
        }
    }
}

/// Replace an embedded `tasks` array with `taskIds`. Returns whether the
/// column changed.
fn convert_placement(column: &mut Map<String, Value>) -> bool {
    let Some(tasks) = column.remove("tasks") else {
        return false;
    };
    if column.contains_key("taskIds") {
        return true;
    }
    let ids: Vec<Value> = tasks
        .as_array()
        .map(|tasks| {
            tasks
                .iter()
                .filter_map(|t| t.get("id").filter(|id| id.is_string()).cloned())
                .collect()
        })
        .unwrap_or_default();
    column.insert("taskIds".into(), Value::Array(ids));
    true
}
