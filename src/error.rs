//! Error types for the task tracker core

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which registry an identifier was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Project,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Task => f.write_str("Task"),
            EntityKind::Project => f.write_str("Project"),
        }
    }
}

/// Errors reported by tracker operations.
///
/// Every variant is a distinct condition the caller can match on; none of them are retried
/// internally.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A required argument was blank, negative or otherwise unusable
    #[error("{0}")]
    Validation(String),

    /// No task or project matched the identifier
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// The identifier matched more than one entity
    #[error("{}", ambiguous_message(.kind, .id))]
    Ambiguous { kind: EntityKind, id: String },

    /// An import row could not be converted into a task
    #[error("Malformed CSV data on line {line}: {reason}")]
    MalformedData { line: usize, reason: String },

    /// The CSV file to import does not exist
    #[error("CSV file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Reading or writing a CSV file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn ambiguous_message(kind: &EntityKind, id: &str) -> String {
    match kind {
        EntityKind::Task => format!(
            "Short id '{}' matches more than one task. Use the full task id.",
            id
        ),
        EntityKind::Project => format!(
            "More than one project is named '{}'. Use the project id.",
            id
        ),
    }
}

impl TrackerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        TrackerError::Validation(message.into())
    }

    pub(crate) fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        TrackerError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn ambiguous(kind: EntityKind, id: impl Into<String>) -> Self {
        TrackerError::Ambiguous {
            kind,
            id: id.into(),
        }
    }
}

/// Result alias used throughout the tracker core
pub type Result<T> = std::result::Result<T, TrackerError>;
