//! Timetable counters.
//!
//! The numbers shown beside the grid: collection sizes, how many entries
//! the current view placed, the conflict count, and per-teacher /
//! per-classroom load over the week.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed | Entries visible in the current view |
//! | Conflicts | Pairs in the last conflict report |
//! | Teacher load | Valid entries taught by the teacher |
//! | Classroom occupancy | Distinct occupied cells / 35 |
//!
//! Load and occupancy count every valid entry, independent of the view
//! filter.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::grid::{self, CellAddress, CELL_COUNT};
use crate::models::EntityId;
use crate::overlay::ConflictOverlay;
use crate::store::{Domain, EntityStore};
use crate::view::{Placement, ViewEngine};

/// Counters for one snapshot and view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub teachers: usize,
    pub classrooms: usize,
    pub courses: usize,
    pub entries: usize,
    /// Entries placed by the current view.
    pub placed: usize,
    /// Conflict pairs in the last report.
    pub conflicts: usize,
    /// Valid entries per teacher.
    pub teacher_load: BTreeMap<EntityId, usize>,
    /// Fraction of the week's cells each classroom is booked (0.0..1.0).
    pub classroom_occupancy: BTreeMap<EntityId, f64>,
}

impl ScheduleStats {
    /// Computes counters from the store, the current placement and the
    /// conflict overlay.
    pub fn calculate(store: &EntityStore, placement: &Placement, overlay: &ConflictOverlay) -> Self {
        let mut teacher_load: BTreeMap<EntityId, usize> = BTreeMap::new();
        let mut room_cells: HashMap<EntityId, BTreeSet<CellAddress>> = HashMap::new();

        for entry in store.entries() {
            if ViewEngine::label_for(store, entry).is_none() {
                continue;
            }
            let Ok(cell) = grid::cell_for(entry.day, &entry.time_slot) else {
                continue;
            };
            *teacher_load.entry(entry.teacher_id).or_insert(0) += 1;
            room_cells.entry(entry.classroom_id).or_default().insert(cell);
        }

        let classroom_occupancy = room_cells
            .into_iter()
            .map(|(id, cells)| (id, cells.len() as f64 / CELL_COUNT as f64))
            .collect();

        Self {
            teachers: store.count(Domain::Teachers),
            classrooms: store.count(Domain::Classrooms),
            courses: store.count(Domain::Courses),
            entries: store.count(Domain::Schedule),
            placed: placement.placed_count(),
            conflicts: overlay.count(),
            teacher_load,
            classroom_occupancy,
        }
    }

    /// Mean occupancy over every loaded classroom (unbooked rooms count
    /// as 0). `None` when no classroom is loaded.
    pub fn avg_occupancy(&self) -> Option<f64> {
        if self.classrooms == 0 {
            return None;
        }
        let total: f64 = self.classroom_occupancy.values().sum();
        Some(total / self.classrooms as f64)
    }
}
