//! Domain model for task assignment and the status workflow.
//!
//! Tasks are assigned by an admin to a user, move through `pending`,
//! `in_progress` and `completed`, and may carry one attached document. The
//! free-form location string and due-date presentation helpers live here as
//! well.

mod document;
mod due_date;
mod error;
mod ids;
mod location;
mod status;
mod task;
mod view;

pub use document::DocumentPath;
pub use due_date::{INVALID_DATE_LABEL, NO_DATE_LABEL, format_due_date, today};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskDescription, TaskId, TaskTitle};
pub use location::{Coordinates, ParsedLocation, TaskLocation, parse_location};
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task};
pub use view::{TaskFilter, TaskView, attach_summaries};
