//! Reference entities: teachers, classrooms, courses.
//!
//! These are the records a schedule entry points at. Each collection is
//! fetched as a whole and replaced as a whole; records are never patched
//! in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier shared by every record kind (integer keys on the wire).
pub type EntityId = i64;

/// The kinds of record a schedule entry can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Teacher,
    Classroom,
    Course,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Teacher => "teacher",
            EntityKind::Classroom => "classroom",
            EntityKind::Course => "course",
        };
        f.write_str(s)
    }
}

/// A teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Academic title (e.g. "Professor").
    #[serde(default)]
    pub title: Option<String>,
    /// Owning department.
    #[serde(default)]
    pub department: Option<String>,
}

/// A classroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: EntityId,
    /// Display name (room number).
    pub name: String,
    /// Seats.
    pub capacity: u32,
    /// Building the room is in.
    #[serde(default)]
    pub building: Option<String>,
}

/// A course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Catalogue code (e.g. "CS101").
    pub code: String,
    /// Credit value.
    pub credits: f64,
    /// Teaching hours per term.
    pub hours: u32,
}

impl Teacher {
    /// Creates a teacher with no title or department.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: None,
            department: None,
        }
    }

    /// Sets the academic title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

impl Classroom {
    /// Creates a classroom with zero capacity and no building.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            capacity: 0,
            building: None,
        }
    }

    /// Sets the seat count.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the building.
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }
}

impl Course {
    /// Creates a course with an empty code and no credits.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: String::new(),
            credits: 0.0,
            hours: 0,
        }
    }

    /// Sets the catalogue code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the credit value.
    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = credits;
        self
    }

    /// Sets the teaching hours.
    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours = hours;
        self
    }
}
