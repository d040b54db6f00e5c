//! View mode, filters and the read-only projections built from them

use super::ids::ColumnId;
use super::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which column set the board currently shows and mutates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Normal,
    Presentation,
}

impl ViewMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Presentation,
            Self::Presentation => Self::Normal,
        }
    }

    /// The stored string literal
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Presentation => "presentation",
        }
    }

    pub fn is_presentation(&self) -> bool {
        matches!(self, Self::Presentation)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    /// Accepts the bare literal or a JSON-quoted one
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('"') {
            "normal" => Ok(Self::Normal),
            "presentation" => Ok(Self::Presentation),
            other => Err(format!("unknown view mode '{}'", other)),
        }
    }
}

/// Hidden-flag filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    All,
    Visible,
    Hidden,
}

impl Visibility {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Visible => !task.hidden,
            Self::Hidden => task.hidden,
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "visible" => Ok(Self::Visible),
            "hidden" => Ok(Self::Hidden),
            other => Err(format!("unknown visibility '{}'", other)),
        }
    }
}

/// Tag + visibility filter applied by the derived views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Only tasks with exactly this tag; `None` keeps every tag
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let tag_ok = self.tag.as_deref().map_or(true, |tag| task.tag == tag);
        tag_ok && self.visibility.matches(task)
    }
}

/// A column as the presentation layer should draw it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedColumn {
    pub id: ColumnId,
    pub title: String,
    pub order: usize,
    pub tasks: Vec<Task>,
}

/// A distinct tag and the color it is drawn with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    pub tag: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_toggle_and_literals() {
        assert_eq!(ViewMode::default(), ViewMode::Normal);
        assert_eq!(ViewMode::Normal.toggled(), ViewMode::Presentation);
        assert_eq!(ViewMode::Presentation.toggled(), ViewMode::Normal);
        assert_eq!(ViewMode::Presentation.to_string(), "presentation");
        assert_eq!("\"normal\"".parse::<ViewMode>().unwrap(), ViewMode::Normal);
        assert!("sideways".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        let mut task = Task::new("A", ColumnId::from("c")).with_tag("bug");
        let by_tag = TaskFilter {
            tag: Some("bug".into()),
            visibility: Visibility::All,
        };
        assert!(by_tag.matches(&task));

        let other_tag = TaskFilter {
            tag: Some("feature".into()),
            ..Default::default()
        };
        assert!(!other_tag.matches(&task));

        task.hidden = true;
        let visible = TaskFilter {
            tag: None,
            visibility: Visibility::Visible,
        };
        assert!(!visible.matches(&task));
        assert!(Visibility::Hidden.matches(&task));
    }
}
