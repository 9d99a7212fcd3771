//! Application services for task assignment and the status workflow.

mod lifecycle;

pub use lifecycle::{
    AssignTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
