//! Document export and import files.
//!
//! An export file is exactly the document as pretty JSON. Imports are
//! checked for a `columns` array and migrated like stored boards.

use crate::error::Result;
use crate::migrate;
use crate::types::Document;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Serialize a document for export
pub fn export_document(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// `<product>-board-<YYYY-MM-DD>.json`
pub fn export_file_name(product: &str, date: NaiveDate) -> String {
    format!("{product}-board-{}.json", date.format("%Y-%m-%d"))
}

/// Parse imported text into a document, migrating legacy fields
pub fn parse_document(text: &str, default_tag_color: &str) -> Result<Document> {
    let (document, stats) = migrate::parse_document(text, default_tag_color)?;
    if !stats.is_empty() {
        info!(?stats, "migrated imported board");
    }
    Ok(document)
}

/// Write an export file into `dir`, returning its path
pub async fn write_export(
    dir: &Path,
    product: &str,
    date: NaiveDate,
    document: &Document,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(product, date));
    let content = export_document(document)?;
    fs::create_dir_all(dir).await?;
    fs::write(&path, content).await?;
    debug!(path = %path.display(), "wrote export");
    Ok(path)
}

/// Read an import file's text
pub async fn read_import(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::types::Task;
    use tempfile::TempDir;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            export_file_name("quickmanage", date),
            "quickmanage-board-2024-03-09.json"
        );
    }

    #[test]
    fn test_export_is_the_document() {
        let document = Document::default_board();
        let text = export_document(&document).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(value["columns"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_parse_rejects_missing_columns() {
        let err = parse_document(r#"{"lanes": []}"#, "#f87171").unwrap_err();
        assert!(matches!(err, BoardError::InvalidDocument { .. }));
    }

    #[tokio::test]
    async fn test_export_then_import_file() {
        let temp = TempDir::new().unwrap();
        let mut document = Document::default_board();
        let column = document.columns[2].id.clone();
        document.add_task(&column, Task::new("Shipped", column.clone()).with_tag("release"));
        document.reset_presentation();

        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let path = write_export(&temp.path().join("out"), "acme", date, &document)
            .await
            .unwrap();
        assert!(path.ends_with("acme-board-2025-01-31.json"));

        let text = read_import(&path).await.unwrap();
        assert_eq!(parse_document(&text, "#f87171").unwrap(), document);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_import(&temp.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, BoardError::Io(_)));
    }
}
