//! View state passed to placement and rendering.

use serde::{Deserialize, Serialize};

use super::ViewMode;
use crate::models::EntityId;

/// Everything the user can toggle without fetching.
///
/// An immutable value: each setter returns a new state, and the controller
/// owns the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Grouping dimension.
    pub mode: ViewMode,
    /// Selected teacher or classroom id (ignored in course view).
    pub filter: Option<EntityId>,
    /// Whether conflict cells are highlighted.
    pub show_conflicts: bool,
    /// Whether cells without placements are drawn.
    pub show_empty: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Teacher,
            filter: None,
            show_conflicts: true,
            show_empty: true,
        }
    }
}

impl ViewState {
    /// Creates the default state in the given mode.
    pub fn in_mode(mode: ViewMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Switches mode. The filter is cleared: ids are not comparable across
    /// teacher and classroom views.
    pub fn with_mode(self, mode: ViewMode) -> Self {
        if mode == self.mode {
            return self;
        }
        Self {
            mode,
            filter: None,
            ..self
        }
    }

    /// Sets or clears the filter.
    pub fn with_filter(self, filter: Option<EntityId>) -> Self {
        Self { filter, ..self }
    }

    /// Shows or hides conflict highlights.
    pub fn with_conflicts_shown(self, show_conflicts: bool) -> Self {
        Self {
            show_conflicts,
            ..self
        }
    }

    /// Shows or hides empty cells.
    pub fn with_empty_shown(self, show_empty: bool) -> Self {
        Self { show_empty, ..self }
    }

    /// The filter that actually applies in the current mode.
    pub fn effective_filter(&self) -> Option<EntityId> {
        self.mode.filter_kind().and(self.filter)
    }
}
