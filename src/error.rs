//! Error taxonomy for the timetable core.
//!
//! Nothing here is fatal to the process. Fetch failures surface as an
//! aggregate error state that the user retries; every other kind degrades
//! to "render what is known".

use thiserror::Error;

use crate::models::{EntityId, EntityKind};
use crate::store::Domain;

/// Result type for timetable operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors raised by the timetable core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Network or server error while loading a domain.
    #[error("failed to fetch {domain}: {message}")]
    FetchFailure { domain: Domain, message: String },

    /// Payload was not the sequence of records the domain expects.
    #[error("malformed {domain} response: {message}")]
    MalformedResponse { domain: Domain, message: String },

    /// Day or time slot outside the grid.
    #[error("invalid cell address: day={day}, time_slot={time_slot:?}")]
    InvalidCellAddress { day: i64, time_slot: String },

    /// A schedule entry refers to an entity missing from the store.
    #[error("entry {entry_id} references unknown {kind} {id}")]
    DanglingReference {
        entry_id: EntityId,
        kind: EntityKind,
        id: EntityId,
    },

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ScheduleError {
    /// Whether a user-triggered refresh may clear this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScheduleError::FetchFailure { .. })
    }
}

impl From<std::io::Error> for ScheduleError {
    fn from(err: std::io::Error) -> Self {
        ScheduleError::Io(err.to_string())
    }
}
