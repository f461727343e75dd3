//! Presentation rows.
//!
//! Turns a placement, the conflict overlay and the view toggles into the
//! rows a UI draws: one row per slot, one cell per day, each cell knowing
//! its entries, whether it is highlighted and whether it is hidden. This is
//! the only module that knows about drawing; everything upstream is plain
//! data.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::{CellAddress, Day, TimeSlot};
use crate::overlay::ConflictOverlay;
use crate::view::{PlacedEntry, Placement, ViewState};

/// One drawable cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub address: CellAddress,
    pub entries: Vec<PlacedEntry>,
    /// Conflict highlight applies.
    pub highlighted: bool,
    /// Empty and empty cells are switched off.
    pub hidden: bool,
}

/// One slot row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub slot: TimeSlot,
    pub label: String,
    pub cells: Vec<CellView>,
}

/// The whole grid, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    pub days: Vec<String>,
    pub rows: Vec<RowView>,
}

impl GridView {
    /// Builds the rows for a placement.
    pub fn build(placement: &Placement, overlay: &ConflictOverlay, state: &ViewState) -> Self {
        let rows = TimeSlot::ALL
            .into_iter()
            .map(|slot| RowView {
                slot,
                label: slot.label(),
                cells: Day::ALL
                    .into_iter()
                    .map(|day| {
                        let address = CellAddress::new(day, slot);
                        let entries = placement.entries_at(address).to_vec();
                        CellView {
                            address,
                            highlighted: overlay.is_highlighted(address),
                            hidden: entries.is_empty() && !state.show_empty,
                            entries,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            days: Day::ALL.iter().map(|d| d.label().to_string()).collect(),
            rows,
        }
    }

    /// Cell at an address.
    pub fn cell(&self, address: CellAddress) -> &CellView {
        &self.rows[address.slot as usize].cells[address.day as usize]
    }

    /// Cells a UI actually draws.
    pub fn visible_cells(&self) -> impl Iterator<Item = &CellView> {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| !c.hidden)
    }
}

// Plain-text dump, one line per occupied cell.
impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row.cells.iter().filter(|c| !c.entries.is_empty()) {
                let mark = if cell.highlighted { "!" } else { " " };
                let names: Vec<String> = cell
                    .entries
                    .iter()
                    .map(|p| {
                        format!(
                            "{} / {} / {}",
                            p.label.course, p.label.teacher, p.label.classroom
                        )
                    })
                    .collect();
                writeln!(f, "{mark}{} {}: {}", cell.address.day, row.label, names.join("; "))?;
            }
        }
        Ok(())
    }
}
