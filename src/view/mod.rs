//! Views over the schedule.
//!
//! A view decides which entries are visible and what each placed entry
//! says. Teacher and classroom views can be narrowed to one entity; the
//! course view always shows everything.
//!
//! # Usage
//!
//! ```
//! use u_timetable::store::EntityStore;
//! use u_timetable::view::{ViewEngine, ViewMode, ViewState};
//!
//! let store = EntityStore::new();
//! let state = ViewState::in_mode(ViewMode::Classroom).with_filter(Some(2));
//! let placement = ViewEngine::place(&store, &state);
//! assert_eq!(placement.placed_count(), 0);
//! ```

mod engine;
mod state;

pub use engine::{CellLabel, FilterOption, PlacedEntry, Placement, SkipCounts, ViewEngine};
pub use state::ViewState;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;
use crate::models::EntityKind;

/// Grouping dimension of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Teacher,
    Classroom,
    Course,
}

impl ViewMode {
    /// The entry reference a filter in this mode compares against.
    ///
    /// `None` for the course view, which is never filtered.
    pub fn filter_kind(self) -> Option<EntityKind> {
        match self {
            ViewMode::Teacher => Some(EntityKind::Teacher),
            ViewMode::Classroom => Some(EntityKind::Classroom),
            ViewMode::Course => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Teacher => "teacher",
            ViewMode::Classroom => "classroom",
            ViewMode::Course => "course",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(ViewMode::Teacher),
            "classroom" => Ok(ViewMode::Classroom),
            "course" => Ok(ViewMode::Course),
            other => Err(ScheduleError::Config(format!("unknown view mode: {other}"))),
        }
    }
}
