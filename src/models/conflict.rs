//! Conflict pair model.
//!
//! The remote service reports pairs of entries that cannot share a cell
//! (same classroom or same teacher at the same time). Pairs are derived
//! data: they are never stored beyond the next refresh.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Two entries the service found colliding in one cell.
///
/// The descriptive names are flattened the way the service sends them
/// (`course1_name`, `course2_name`, ...); [`ConflictPair::first`] and
/// [`ConflictPair::second`] regroup them per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictPair {
    /// Day of week of the shared cell.
    pub day: i64,
    /// Time slot of the shared cell.
    #[serde(deserialize_with = "super::entry::slot_text")]
    pub time_slot: String,
    /// First colliding entry, when the service names it.
    #[serde(default, alias = "schedule1_id")]
    pub entry_a: Option<EntityId>,
    /// Second colliding entry, when the service names it.
    #[serde(default, alias = "schedule2_id")]
    pub entry_b: Option<EntityId>,
    #[serde(default)]
    pub course1_name: Option<String>,
    #[serde(default)]
    pub teacher1_name: Option<String>,
    #[serde(default)]
    pub classroom1_name: Option<String>,
    #[serde(default)]
    pub course2_name: Option<String>,
    #[serde(default)]
    pub teacher2_name: Option<String>,
    #[serde(default)]
    pub classroom2_name: Option<String>,
}

/// Human-readable description of one side of a conflict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictSide {
    pub course_name: Option<String>,
    pub teacher_name: Option<String>,
    pub classroom_name: Option<String>,
}

impl ConflictPair {
    /// Creates a pair for two entries in one cell.
    pub fn new(
        day: i64,
        time_slot: impl Into<String>,
        entry_a: EntityId,
        entry_b: EntityId,
    ) -> Self {
        Self {
            day,
            time_slot: time_slot.into(),
            entry_a: Some(entry_a),
            entry_b: Some(entry_b),
            course1_name: None,
            teacher1_name: None,
            classroom1_name: None,
            course2_name: None,
            teacher2_name: None,
            classroom2_name: None,
        }
    }

    /// Sets the description of both sides.
    pub fn with_sides(mut self, first: ConflictSide, second: ConflictSide) -> Self {
        self.course1_name = first.course_name;
        self.teacher1_name = first.teacher_name;
        self.classroom1_name = first.classroom_name;
        self.course2_name = second.course_name;
        self.teacher2_name = second.teacher_name;
        self.classroom2_name = second.classroom_name;
        self
    }

    /// Description of the first entry.
    pub fn first(&self) -> ConflictSide {
        ConflictSide {
            course_name: self.course1_name.clone(),
            teacher_name: self.teacher1_name.clone(),
            classroom_name: self.classroom1_name.clone(),
        }
    }

    /// Description of the second entry.
    pub fn second(&self) -> ConflictSide {
        ConflictSide {
            course_name: self.course2_name.clone(),
            teacher_name: self.teacher2_name.clone(),
            classroom_name: self.classroom2_name.clone(),
        }
    }

    /// Whether the pair names the given entry on either side.
    pub fn involves(&self, entry_id: EntityId) -> bool {
        self.entry_a == Some(entry_id) || self.entry_b == Some(entry_id)
    }
}

impl ConflictSide {
    /// Describes one side by course, teacher and classroom names.
    pub fn new(
        course_name: impl Into<String>,
        teacher_name: impl Into<String>,
        classroom_name: impl Into<String>,
    ) -> Self {
        Self {
            course_name: Some(course_name.into()),
            teacher_name: Some(teacher_name.into()),
            classroom_name: Some(classroom_name.into()),
        }
    }
}
