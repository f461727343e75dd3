//! Schedule entry model.
//!
//! An entry books a course, a teacher and a classroom into one grid cell.
//! The day and slot are kept exactly as the service sent them: a stale or
//! malformed coordinate must be detectable when the entry is placed, not
//! hidden by a lossy conversion at decode time.

use serde::{Deserialize, Serialize};

use super::{EntityId, EntityKind};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSlot {
    Text(String),
    Number(i64),
}

/// Reads a slot sent either as text (`"S3"`) or as a number (`3`).
pub(crate) fn slot_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match RawSlot::deserialize(deserializer)? {
        RawSlot::Text(s) => s,
        RawSlot::Number(n) => n.to_string(),
    })
}

/// One booked lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Unique entry identifier.
    pub id: EntityId,
    /// Booked course.
    pub course_id: EntityId,
    /// Teaching teacher.
    pub teacher_id: EntityId,
    /// Hosting classroom.
    pub classroom_id: EntityId,
    /// Day of week, 1 = Monday .. 7 = Sunday.
    pub day: i64,
    /// Time slot code, label or ordinal (see [`crate::grid::TimeSlot::parse`]).
    /// Numeric slots are kept as their decimal text.
    #[serde(deserialize_with = "slot_text")]
    pub time_slot: String,
}

impl ScheduleEntry {
    /// Creates an entry at `(day, time_slot)` with all references set to 0.
    pub fn new(id: EntityId, day: i64, time_slot: impl Into<String>) -> Self {
        Self {
            id,
            course_id: 0,
            teacher_id: 0,
            classroom_id: 0,
            day,
            time_slot: time_slot.into(),
        }
    }

    /// Sets the course reference.
    pub fn with_course(mut self, course_id: EntityId) -> Self {
        self.course_id = course_id;
        self
    }

    /// Sets the teacher reference.
    pub fn with_teacher(mut self, teacher_id: EntityId) -> Self {
        self.teacher_id = teacher_id;
        self
    }

    /// Sets the classroom reference.
    pub fn with_classroom(mut self, classroom_id: EntityId) -> Self {
        self.classroom_id = classroom_id;
        self
    }

    /// The id this entry references for a given kind.
    #[inline]
    pub fn reference(&self, kind: EntityKind) -> EntityId {
        match kind {
            EntityKind::Teacher => self.teacher_id,
            EntityKind::Classroom => self.classroom_id,
            EntityKind::Course => self.course_id,
        }
    }
}
