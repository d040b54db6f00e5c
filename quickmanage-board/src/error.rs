//! Error types for the board state manager

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while loading, saving or importing a board.
///
/// Structural no-ops (unknown ids, blank titles) are not errors; commands
/// report them as unlogged results instead.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A storage key could not be written or removed
    #[error("storage error for '{key}': {message}")]
    Storage { key: String, message: String },

    /// Imported or stored text is not a board document
    #[error("invalid board document: {message}")]
    InvalidDocument { message: String },

    /// Invalid configuration value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Configuration could not be extracted
    #[error("config error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// The background save writer has shut down
    #[error("save writer is closed")]
    WriterClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a storage error
    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the user should be told about this error.
    ///
    /// Persistence and import failures surface as notifications; the rest
    /// are programming or setup errors reported by the caller.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::InvalidDocument { .. } | Self::Json(_)
        )
    }
}

impl From<figment::Error> for BoardError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::storage("quickmanage_board", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "storage error for 'quickmanage_board': quota exceeded"
        );
    }

    #[test]
    fn test_invalid_document() {
        let err = BoardError::invalid_document("missing columns");
        assert!(err.to_string().contains("missing columns"));
    }

    #[test]
    fn test_user_visible() {
        assert!(BoardError::storage("k", "m").is_user_visible());
        assert!(BoardError::invalid_document("bad").is_user_visible());
        assert!(!BoardError::WriterClosed.is_user_visible());
        assert!(!BoardError::invalid_value("save_debounce_ms", "x").is_user_visible());
    }
}
