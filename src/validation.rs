//! Snapshot integrity checks.
//!
//! Placement tolerates bad data by skipping it; this module reports what
//! was skipped and why, so the controller can log one summary instead of
//! staying silent. Detects:
//! - Duplicate IDs within a collection
//! - Entries referencing a missing teacher, classroom or course
//! - Entries whose day or slot is outside the grid
//!
//! It does not look for double bookings; that is the service's job.

use std::collections::HashSet;

use crate::error::ScheduleError;
use crate::grid;
use crate::models::{EntityId, EntityKind};
use crate::store::{Domain, EntityStore};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records of one collection share an ID.
    DuplicateId,
    /// An entry references a record that isn't loaded.
    DanglingReference,
    /// An entry's day or slot is outside the grid.
    InvalidCellAddress,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a loaded snapshot.
///
/// Checks:
/// 1. No duplicate IDs in any collection
/// 2. Every entry's course, teacher and classroom exist
/// 3. Every entry's `(day, time_slot)` is a grid cell
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(store: &EntityStore) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique(Domain::Teachers, store.teachers().iter().map(|t| t.id), &mut errors);
    check_unique(Domain::Classrooms, store.classrooms().iter().map(|c| c.id), &mut errors);
    check_unique(Domain::Courses, store.courses().iter().map(|c| c.id), &mut errors);
    check_unique(Domain::Schedule, store.entries().iter().map(|e| e.id), &mut errors);

    for entry in store.entries() {
        for kind in [EntityKind::Course, EntityKind::Teacher, EntityKind::Classroom] {
            let id = entry.reference(kind);
            if store.lookup(kind, id).is_none() {
                let err = ScheduleError::DanglingReference {
                    entry_id: entry.id,
                    kind,
                    id,
                };
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    err.to_string(),
                ));
            }
        }

        if let Err(err) = grid::cell_for(entry.day, &entry.time_slot) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCellAddress,
                err.to_string(),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique(
    domain: Domain,
    ids: impl Iterator<Item = EntityId>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {domain} ID: {id}"),
            ));
        }
    }
}
