//! Task tracker domain models and business logic
//!
//! This module contains the core tracker data structures and their implementations.
//! It is split into submodules for better organization:
//! - `priority`: Priority levels with rank and display label
//! - `deadline`: Deadline value object with overdue/window checks
//! - `task`: Task structure (plain and time-boxed)
//! - `project`: Named, ordered collection of task references
//! - `reminder`: De-duplicating reminder tracker
//! - `clock` / `ids`: Injectable time and identifier sources
//! - `manager`: Registries and identifier resolution
//! - `queries`: Listing and search methods for TaskManager
//! - `csv_io`: CSV export/import methods for TaskManager

mod clock;
mod csv_io;
mod deadline;
mod ids;
mod manager;
mod priority;
mod project;
mod queries;
mod reminder;
mod task;

// Re-export all public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use csv_io::{CSV_HEADER, ImportSummary};
pub use deadline::{Deadline, format_timestamp, parse_timestamp};
pub use ids::{IdSource, SequenceIds, UuidIds};
pub use manager::TaskManager;
pub use priority::Priority;
pub use project::Project;
pub use reminder::ReminderTracker;
pub use task::{SHORT_ID_LEN, Task, TimeWindow};
