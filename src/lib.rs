//! Weekly timetable view engine.
//!
//! Holds client-side caches of teachers, classrooms, courses and schedule
//! entries fetched from a scheduling service, places entries onto a fixed
//! 7-day × 5-slot grid under a selectable view and filter, and overlays the
//! service's conflict report onto the grid. The service itself (storage,
//! CRUD, conflict detection, generation) lives elsewhere and is reached
//! through [`api::ScheduleApi`].
//!
//! # Modules
//!
//! - **`grid`**: Days, time slots, and `(day, slot)` cell addresses
//! - **`models`**: Wire records: `Teacher`, `Classroom`, `Course`,
//!   `ScheduleEntry`, `ConflictPair`
//! - **`store`**: Per-domain snapshots with ID lookup
//! - **`view`**: View modes, filters, and entry placement
//! - **`overlay`**: Conflict marks and the tri-state check status
//! - **`controller`**: Fetch sequencing, stale-response discard, render gating
//! - **`render`**: Drawable rows for a placement
//! - **`stats`**: Counters beside the grid
//! - **`validation`**: Snapshot integrity checks
//! - **`api`**: Service seam, payload decoding, in-memory service
//! - **`config`**: TOML viewer settings
//!
//! # Data flow
//!
//! ```text
//! fetch → EntityStore::replace → ViewEngine::place → ConflictOverlay::apply → GridView
//! ```
//!
//! Nothing flows backwards: views never write to the store and the overlay
//! never changes placement.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod models;
pub mod overlay;
pub mod render;
pub mod stats;
pub mod store;
pub mod validation;
pub mod view;

pub use controller::{LoadState, ScheduleController};
pub use error::{ScheduleError, ScheduleResult};
pub use grid::{CellAddress, Day, TimeSlot};
