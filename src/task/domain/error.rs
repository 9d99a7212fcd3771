//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or changing tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The location does not resolve to coordinates.
    #[error("location '{0}' does not contain coordinates")]
    MissingCoordinates(String),

    /// The due date lies before today.
    #[error("due date {due_date} is before today ({today})")]
    DueDateInPast {
        /// Requested due date.
        due_date: NaiveDate,
        /// Current date according to the service clock.
        today: NaiveDate,
    },

    /// The document file name cannot be used as a storage path segment.
    #[error("invalid document file name '{0}'")]
    InvalidDocumentName(String),

    /// The requested status change is not part of the workflow.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Task being changed.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
