//! Timetable domain models.
//!
//! Plain records as the scheduling service sends them. Every collection is
//! a snapshot: fetched whole, replaced whole, never patched.
//!
//! # Record Kinds
//!
//! | Record | Keyed by | References |
//! |--------|----------|------------|
//! | Teacher | `id` | none |
//! | Classroom | `id` | none |
//! | Course | `id` | none |
//! | ScheduleEntry | `id` | course, teacher, classroom |
//! | ConflictPair | (day, slot) | two entries |

mod conflict;
mod entity;
mod entry;

pub use conflict::{ConflictPair, ConflictSide};
pub use entity::{Classroom, Course, EntityId, EntityKind, Teacher};
pub use entry::ScheduleEntry;
