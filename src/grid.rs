//! Weekly time grid.
//!
//! The grid is fixed: seven days by five teaching slots. A schedule entry's
//! `(day, time_slot)` maps to exactly one [`CellAddress`]; coordinates
//! outside the grid are a contract violation and are rejected, never
//! clamped.
//!
//! # Layout
//!
//! | Slot | Time | Mon .. Sun |
//! |------|------|------------|
//! | S1 | 08:00-09:40 | 7 cells |
//! | S2 | 10:00-11:40 | 7 cells |
//! | S3 | 14:00-15:40 | 7 cells |
//! | S4 | 16:00-17:40 | 7 cells |
//! | S5 | 19:00-20:40 | 7 cells |
//!
//! Cells are ordered row by row (slot-major, day-minor), the order a grid
//! is drawn in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ScheduleError, ScheduleResult};

/// Number of cells in the grid.
pub const CELL_COUNT: usize = Day::ALL.len() * TimeSlot::ALL.len();

/// Day of week, numbered 1 (Monday) to 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All days in week order.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Day from its 1-based number.
    pub fn from_number(n: i64) -> Option<Self> {
        if (1..=7).contains(&n) {
            Some(Self::ALL[(n - 1) as usize])
        } else {
            None
        }
    }

    /// 1-based day number.
    #[inline]
    pub fn number(self) -> i64 {
        self as i64 + 1
    }

    /// Column header label.
    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
            Day::Friday => "Fri",
            Day::Saturday => "Sat",
            Day::Sunday => "Sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the five teaching periods of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    S1,
    S2,
    S3,
    S4,
    S5,
}

impl TimeSlot {
    /// All slots in time order.
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::S1,
        TimeSlot::S2,
        TimeSlot::S3,
        TimeSlot::S4,
        TimeSlot::S5,
    ];

    /// Short code (`"S1"`).
    pub fn code(self) -> &'static str {
        match self {
            TimeSlot::S1 => "S1",
            TimeSlot::S2 => "S2",
            TimeSlot::S3 => "S3",
            TimeSlot::S4 => "S4",
            TimeSlot::S5 => "S5",
        }
    }

    /// Time range (`"08:00-09:40"`).
    pub fn range(self) -> &'static str {
        match self {
            TimeSlot::S1 => "08:00-09:40",
            TimeSlot::S2 => "10:00-11:40",
            TimeSlot::S3 => "14:00-15:40",
            TimeSlot::S4 => "16:00-17:40",
            TimeSlot::S5 => "19:00-20:40",
        }
    }

    /// Row header label (`"S1 (08:00-09:40)"`).
    pub fn label(self) -> String {
        format!("{} ({})", self.code(), self.range())
    }

    /// 1-based ordinal.
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize + 1
    }

    /// Parses a slot as the service may send it.
    ///
    /// Accepts the code (`"S2"`), the time range (`"10:00-11:40"`, hours
    /// with or without a leading zero), the row label (`"S2 (10:00-11:40)"`)
    /// or the ordinal (`"2"`). Surrounding whitespace is ignored; anything
    /// else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|slot| {
            raw.eq_ignore_ascii_case(slot.code())
                || slot.matches_range(raw)
                || raw.parse::<usize>().ok() == Some(slot.ordinal())
                || raw
                    .split_once('(')
                    .and_then(|(code, rest)| Some((code.trim(), rest.strip_suffix(')')?)))
                    .is_some_and(|(code, range)| {
                        code.eq_ignore_ascii_case(slot.code()) && slot.matches_range(range)
                    })
        })
    }

    fn matches_range(self, raw: &str) -> bool {
        raw.contains(':') && range_parts(raw).eq(range_parts(self.range()))
    }
}

// "08:00-09:40" and "8:00-9:40" yield the same parts.
fn range_parts(range: &str) -> impl Iterator<Item = &str> {
    range
        .split('-')
        .flat_map(|t| t.split(':'))
        .map(|p| p.trim().trim_start_matches('0'))
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Address of one grid cell.
///
/// Ordered slot-major so that a sorted map of cells reads row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub slot: TimeSlot,
    pub day: Day,
}

impl CellAddress {
    /// Creates an address.
    pub fn new(day: Day, slot: TimeSlot) -> Self {
        Self { slot, day }
    }

    /// Dense index in `0..CELL_COUNT`, row by row.
    #[inline]
    pub fn index(&self) -> usize {
        (self.slot as usize) * Day::ALL.len() + self.day as usize
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.slot)
    }
}

/// Maps a wire `(day, time_slot)` pair to its cell.
///
/// # Errors
/// [`ScheduleError::InvalidCellAddress`] when the day is outside 1..=7 or
/// the slot is not one of the five known slots.
pub fn cell_for(day: i64, time_slot: &str) -> ScheduleResult<CellAddress> {
    match (Day::from_number(day), TimeSlot::parse(time_slot)) {
        (Some(day), Some(slot)) => Ok(CellAddress::new(day, slot)),
        _ => Err(ScheduleError::InvalidCellAddress {
            day,
            time_slot: time_slot.to_string(),
        }),
    }
}

/// Iterates all cells row by row.
///
/// The iterator is finite and cheap to clone; call again (or clone) to
/// restart.
pub fn all_cells() -> AllCells {
    AllCells { next: 0 }
}

/// Iterator over every [`CellAddress`], see [`all_cells`].
#[derive(Debug, Clone)]
pub struct AllCells {
    next: usize,
}

impl Iterator for AllCells {
    type Item = CellAddress;

    fn next(&mut self) -> Option<CellAddress> {
        if self.next >= CELL_COUNT {
            return None;
        }
        let i = self.next;
        self.next += 1;
        let days = Day::ALL.len();
        Some(CellAddress::new(Day::ALL[i % days], TimeSlot::ALL[i / days]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = CELL_COUNT.saturating_sub(self.next);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for AllCells {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cell_for_is_bijection() {
        let mut seen = HashSet::new();
        for day in 1..=7 {
            for slot in TimeSlot::ALL {
                let cell = cell_for(day, slot.code()).unwrap();
                assert_eq!(cell.day.number(), day);
                assert_eq!(cell.slot, slot);
                assert!(seen.insert(cell));
            }
        }
        assert_eq!(seen.len(), CELL_COUNT);
        assert_eq!(CELL_COUNT, 35);

        let all: HashSet<CellAddress> = all_cells().collect();
        assert_eq!(all, seen);
    }

    #[test]
    fn test_cell_index_dense() {
        let indices: Vec<usize> = all_cells().map(|c| c.index()).collect();
        assert_eq!(indices, (0..CELL_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_all_cells_restartable() {
        let iter = all_cells();
        assert_eq!(iter.len(), 35);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(all_cells().count(), 35);
    }

    #[test]
    fn test_all_cells_row_order() {
        let cells: Vec<_> = all_cells().take(8).collect();
        assert_eq!(cells[0], CellAddress::new(Day::Monday, TimeSlot::S1));
        assert_eq!(cells[6], CellAddress::new(Day::Sunday, TimeSlot::S1));
        assert_eq!(cells[7], CellAddress::new(Day::Monday, TimeSlot::S2));
    }

    #[test]
    fn test_slot_parse_forms() {
        assert_eq!(TimeSlot::parse("S3"), Some(TimeSlot::S3));
        assert_eq!(TimeSlot::parse("s3"), Some(TimeSlot::S3));
        assert_eq!(TimeSlot::parse("14:00-15:40"), Some(TimeSlot::S3));
        assert_eq!(TimeSlot::parse("S3 (14:00-15:40)"), Some(TimeSlot::S3));
        assert_eq!(TimeSlot::parse(" 3 "), Some(TimeSlot::S3));
        assert_eq!(TimeSlot::parse("S6"), None);
        assert_eq!(TimeSlot::parse("0"), None);
        assert_eq!(TimeSlot::parse(""), None);
    }

    #[test]
    fn test_slot_parse_unpadded_range() {
        assert_eq!(TimeSlot::parse("8:00-9:40"), Some(TimeSlot::S1));
        assert_eq!(TimeSlot::parse("08:00-09:40"), Some(TimeSlot::S1));
        assert_eq!(TimeSlot::parse("S1 (8:00-9:40)"), Some(TimeSlot::S1));
        assert_eq!(TimeSlot::parse("8:00-9:41"), None);
        assert_eq!(TimeSlot::parse("S2 (8:00-9:40)"), None);
        assert!(cell_for(1, "8:00-9:40").is_ok());
    }

    #[test]
    fn test_invalid_cell_address() {
        let err = cell_for(0, "S1").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidCellAddress {
                day: 0,
                time_slot: "S1".into()
            }
        );
        assert!(cell_for(8, "S1").is_err());
        assert!(cell_for(1, "lunch").is_err());
    }

    #[test]
    fn test_cell_ordering_reads_row_by_row() {
        let mon_s2 = CellAddress::new(Day::Monday, TimeSlot::S2);
        let sun_s1 = CellAddress::new(Day::Sunday, TimeSlot::S1);
        assert!(sun_s1 < mon_s2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Day::Wednesday.label(), "Wed");
        assert_eq!(Day::Sunday.number(), 7);
        assert_eq!(TimeSlot::S5.label(), "S5 (19:00-20:40)");
        assert_eq!(
            CellAddress::new(Day::Friday, TimeSlot::S4).to_string(),
            "Fri S4"
        );
    }
}
