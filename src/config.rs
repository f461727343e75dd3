//! Viewer configuration.
//!
//! Defaults for the view toggles and the refresh behaviour, read from a
//! TOML file:
//!
//! ```toml
//! [viewer]
//! default_view = "classroom"
//! show_conflicts = true
//! show_empty = false
//! check_conflicts_on_refresh = true
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ScheduleResult;
use crate::view::{ViewMode, ViewState};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub viewer: ViewerSettings,
}

/// `[viewer]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub default_view: ViewMode,
    #[serde(default = "default_true")]
    pub show_conflicts: bool,
    #[serde(default = "default_true")]
    pub show_empty: bool,
    /// Run the conflict check after every data refresh.
    #[serde(default = "default_true")]
    pub check_conflicts_on_refresh: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            default_view: ViewMode::default(),
            show_conflicts: true,
            show_empty: true,
            check_conflicts_on_refresh: true,
        }
    }
}

impl ViewerConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// The view state a fresh controller starts in.
    pub fn initial_view(&self) -> ViewState {
        ViewState::in_mode(self.viewer.default_view)
            .with_conflicts_shown(self.viewer.show_conflicts)
            .with_empty_shown(self.viewer.show_empty)
    }
}
