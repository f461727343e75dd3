//! Placement of schedule entries onto the grid.
//!
//! # Algorithm
//! For every entry, in fetch order:
//! 1. Resolve course, teacher and classroom. Any miss → skip (dangling).
//! 2. If the view has an effective filter, skip entries whose teacher or
//!    classroom (by mode) differs from it.
//! 3. Map `(day, time_slot)` to a cell. Failure → skip and warn.
//! 4. Append to the cell's list.
//!
//! The result is rebuilt from scratch on every call. Within a cell, entries
//! keep fetch order; nothing re-sorts them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::{ViewMode, ViewState};
use crate::grid::{self, CellAddress};
use crate::models::{EntityId, ScheduleEntry};
use crate::store::EntityStore;

/// Three-line label drawn for a placed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLabel {
    pub course: String,
    pub teacher: String,
    pub classroom: String,
}

/// An entry as it appears in a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedEntry {
    pub entry_id: EntityId,
    pub label: CellLabel,
}

/// Why entries were left off the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    /// Entries referencing a missing teacher, classroom or course.
    pub dangling: usize,
    /// Entries excluded by the view filter.
    pub filtered: usize,
    /// Entries whose day or slot is outside the grid.
    pub invalid_cell: usize,
}

/// Cell → placed entries, for one view over one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// Occupied cells only, row by row.
    pub cells: BTreeMap<CellAddress, Vec<PlacedEntry>>,
    pub skipped: SkipCounts,
}

impl Placement {
    /// Entries in one cell (empty if unoccupied).
    pub fn entries_at(&self, cell: CellAddress) -> &[PlacedEntry] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total placed entries across all cells.
    pub fn placed_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Cells holding more than one entry.
    pub fn crowded_cells(&self) -> impl Iterator<Item = CellAddress> + '_ {
        self.cells
            .iter()
            .filter(|(_, entries)| entries.len() > 1)
            .map(|(cell, _)| *cell)
    }

    /// Cell an entry was placed in, if visible.
    pub fn cell_of(&self, entry_id: EntityId) -> Option<CellAddress> {
        self.cells
            .iter()
            .find(|(_, entries)| entries.iter().any(|p| p.entry_id == entry_id))
            .map(|(cell, _)| *cell)
    }
}

/// An option of the filter selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: EntityId,
    pub name: String,
}

/// Stateless placement engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewEngine;

impl ViewEngine {
    /// Places every visible entry of the store under `state`.
    pub fn place(store: &EntityStore, state: &ViewState) -> Placement {
        let filter = state
            .mode
            .filter_kind()
            .zip(state.effective_filter());
        let mut placement = Placement::default();

        for entry in store.entries() {
            let Some(label) = Self::label_for(store, entry) else {
                placement.skipped.dangling += 1;
                continue;
            };

            if let Some((kind, id)) = filter {
                if entry.reference(kind) != id {
                    placement.skipped.filtered += 1;
                    continue;
                }
            }

            let cell = match grid::cell_for(entry.day, &entry.time_slot) {
                Ok(cell) => cell,
                Err(err) => {
                    warn!(entry_id = entry.id, error = %err, "skipping unplaceable entry");
                    placement.skipped.invalid_cell += 1;
                    continue;
                }
            };

            placement.cells.entry(cell).or_default().push(PlacedEntry {
                entry_id: entry.id,
                label,
            });
        }

        debug!(
            mode = %state.mode,
            filter = ?state.effective_filter(),
            placed = placement.placed_count(),
            skipped = ?placement.skipped,
            "placement rebuilt"
        );
        placement
    }

    /// Resolves the three names of an entry; `None` on any dangling id.
    pub fn label_for(store: &EntityStore, entry: &ScheduleEntry) -> Option<CellLabel> {
        let course = store.course(entry.course_id)?;
        let teacher = store.teacher(entry.teacher_id)?;
        let classroom = store.classroom(entry.classroom_id)?;
        Some(CellLabel {
            course: course.name.clone(),
            teacher: teacher.name.clone(),
            classroom: classroom.name.clone(),
        })
    }

    /// Filter selector options for a mode, in fetch order.
    pub fn filter_options(store: &EntityStore, mode: ViewMode) -> Vec<FilterOption> {
        match mode {
            ViewMode::Teacher => store
                .teachers()
                .iter()
                .map(|t| FilterOption {
                    id: t.id,
                    name: t.name.clone(),
                })
                .collect(),
            ViewMode::Classroom => store
                .classrooms()
                .iter()
                .map(|c| FilterOption {
                    id: c.id,
                    name: c.name.clone(),
                })
                .collect(),
            ViewMode::Course => Vec::new(),
        }
    }
}
