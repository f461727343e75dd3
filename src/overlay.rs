//! Conflict overlay.
//!
//! Marks the cells named by the service's conflict report. The overlay is
//! additive: it never re-places entries and never touches the store. Cells
//! are grid coordinates, so a mark survives any change of view or filter.
//!
//! # Status
//! `Unchecked` (no successful check since the last data refresh),
//! `CheckedEmpty` (checked, nothing found) and `CheckedWithConflicts` are
//! kept apart so a UI can tell "no conflicts" from "not checked yet".
//!
//! Hiding highlights only changes what [`ConflictOverlay::visible_cells`]
//! returns; the marked set stays until the next apply, failure or reset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::grid::{self, CellAddress};
use crate::models::{ConflictPair, EntityId};

/// Outcome of the last conflict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStatus {
    #[default]
    Unchecked,
    CheckedEmpty,
    CheckedWithConflicts,
}

/// Result of [`ConflictOverlay::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayResult {
    pub marked_cells: BTreeSet<CellAddress>,
    pub count: usize,
}

/// Conflict marks over the grid.
#[derive(Debug, Clone)]
pub struct ConflictOverlay {
    status: ConflictStatus,
    conflicts: Vec<ConflictPair>,
    marked: BTreeSet<CellAddress>,
    visible: bool,
}

impl Default for ConflictOverlay {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConflictOverlay {
    /// Creates an unchecked overlay with the given highlight visibility.
    pub fn new(visible: bool) -> Self {
        Self {
            status: ConflictStatus::Unchecked,
            conflicts: Vec::new(),
            marked: BTreeSet::new(),
            visible,
        }
    }

    /// Replaces the conflict set with a freshly fetched report.
    ///
    /// Pairs with coordinates outside the grid still count but mark no
    /// cell. Applying the same report twice yields the same result.
    pub fn apply(&mut self, conflicts: &[ConflictPair]) -> OverlayResult {
        let mut marked = BTreeSet::new();
        for pair in conflicts {
            match grid::cell_for(pair.day, &pair.time_slot) {
                Ok(cell) => {
                    marked.insert(cell);
                }
                Err(err) => warn!(error = %err, "conflict outside the grid"),
            }
        }

        self.status = if conflicts.is_empty() {
            ConflictStatus::CheckedEmpty
        } else {
            ConflictStatus::CheckedWithConflicts
        };
        self.conflicts = conflicts.to_vec();
        self.marked = marked;

        info!(
            count = self.conflicts.len(),
            cells = self.marked.len(),
            "conflict report applied"
        );
        self.result()
    }

    /// The conflict check failed: clear marks and fall back to unchecked.
    pub fn fail(&mut self) {
        self.clear();
    }

    /// Data changed: the previous report no longer describes it.
    pub fn reset(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.status = ConflictStatus::Unchecked;
        self.conflicts.clear();
        self.marked.clear();
    }

    /// Shows or hides highlights without discarding the marked set.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn status(&self) -> ConflictStatus {
        self.status
    }

    /// Number of conflict pairs in the last report.
    pub fn count(&self) -> usize {
        self.conflicts.len()
    }

    /// Pairs of the last report, for a conflict list.
    pub fn conflicts(&self) -> &[ConflictPair] {
        &self.conflicts
    }

    /// Every marked cell, regardless of visibility.
    pub fn marked_cells(&self) -> &BTreeSet<CellAddress> {
        &self.marked
    }

    /// Cells that should render highlighted right now.
    pub fn visible_cells(&self) -> BTreeSet<CellAddress> {
        if self.visible {
            self.marked.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Whether a cell renders highlighted right now.
    pub fn is_highlighted(&self, cell: CellAddress) -> bool {
        self.visible && self.marked.contains(&cell)
    }

    /// Whether an entry is named by any pair of the last report.
    pub fn involves(&self, entry_id: EntityId) -> bool {
        self.conflicts.iter().any(|p| p.involves(entry_id))
    }

    /// Marked set and count of the current report.
    pub fn result(&self) -> OverlayResult {
        OverlayResult {
            marked_cells: self.marked.clone(),
            count: self.conflicts.len(),
        }
    }
}
