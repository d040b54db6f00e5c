//! Configuration loading using figment
//!
//! Sources are merged in precedence order, later ones winning:
//! 1. Built-in defaults
//! 2. Configuration files, in the order given (TOML, YAML or JSON by extension)
//! 3. Environment variables prefixed with `QUICKMANAGE_`

use crate::error::{BoardError, Result};
use crate::palette::{is_hex_color, DEFAULT_TAG_COLOR};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "QUICKMANAGE_";

/// Settings for a board instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Directory backing the file key-value store
    pub storage_dir: PathBuf,
    /// Prefix of exported file names
    pub product_name: String,
    /// Color for tasks that arrive without one
    pub default_tag_color: String,
    /// Longest a pending save waits before it is written
    pub save_debounce_ms: u64,
    /// Entries kept in the in-memory activity list
    pub activity_limit: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".quickmanage"),
            product_name: "quickmanage".to_string(),
            default_tag_color: DEFAULT_TAG_COLOR.to_string(),
            save_debounce_ms: 250,
            activity_limit: 100,
        }
    }
}

impl BoardConfig {
    /// Load defaults, then each file in `files` that exists, then env vars.
    pub fn load(files: &[PathBuf]) -> Result<Self> {
        let config: Self = Self::figment(files).extract()?;
        config.validate()?;
        debug!(
            storage_dir = %config.storage_dir.display(),
            debounce_ms = config.save_debounce_ms,
            "loaded board config"
        );
        Ok(config)
    }

    /// Build the layered figment without extracting it
    pub fn figment(files: &[PathBuf]) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        for path in files {
            if path.is_file() {
                trace!(path = %path.display(), "merging config file");
                figment = figment.merge(file_provider(path));
            }
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Reject values the board cannot work with
    pub fn validate(&self) -> Result<()> {
        if !is_hex_color(&self.default_tag_color) {
            return Err(BoardError::invalid_value(
                "default_tag_color",
                format!("'{}' is not a #rrggbb color", self.default_tag_color),
            ));
        }
        if self.activity_limit == 0 {
            return Err(BoardError::invalid_value(
                "activity_limit",
                "must be at least 1",
            ));
        }
        if self.product_name.trim().is_empty() {
            return Err(BoardError::invalid_value("product_name", "must not be empty"));
        }
        Ok(())
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}

fn file_provider(path: &Path) -> Figment {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Figment::from(Json::file(path)),
        Some("yaml") | Some("yml") => Figment::from(Yaml::file(path)),
        _ => Figment::from(Toml::file(path)),
    }
}
