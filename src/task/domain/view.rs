//! Task listings with embedded user summaries and list filters.

use super::{Task, TaskStatus};
use crate::user::domain::{DepartmentName, User, UserId, UserSummary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Task together with the accounts it references.
///
/// Either summary is `None` when the referenced account no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// The task.
    pub task: Task,
    /// Assigning admin.
    pub assigned_by: Option<UserSummary>,
    /// Assignee.
    pub assigned_to: Option<UserSummary>,
}

impl TaskView {
    /// Returns the assignee's department, if known.
    #[must_use]
    pub fn assignee_department(&self) -> Option<&DepartmentName> {
        self.assigned_to
            .as_ref()
            .and_then(|summary| summary.department.as_ref())
    }
}

/// Pairs each task with the summaries of the accounts it references.
#[must_use]
pub fn attach_summaries(tasks: Vec<Task>, users: &[User]) -> Vec<TaskView> {
    let summaries: HashMap<UserId, UserSummary> = users
        .iter()
        .map(|user| (user.id(), user.summary()))
        .collect();
    tasks
        .into_iter()
        .map(|task| TaskView {
            assigned_by: summaries.get(&task.assigned_by()).cloned(),
            assigned_to: summaries.get(&task.assigned_to()).cloned(),
            task,
        })
        .collect()
}

/// Filter applied to task listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    department: Option<DepartmentName>,
}

impl TaskFilter {
    /// Creates a filter that keeps every task.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            status: None,
            department: None,
        }
    }

    /// Keeps only tasks in `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps only tasks whose assignee belongs to `department`.
    #[must_use]
    pub fn with_department(mut self, department: DepartmentName) -> Self {
        self.department = Some(department);
        self
    }

    /// Returns `true` when the task status passes the filter.
    #[must_use]
    pub fn accepts_task(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
    }

    /// Returns `true` when the view passes both status and department
    /// checks.
    #[must_use]
    pub fn accepts(&self, view: &TaskView) -> bool {
        let department_matches = self
            .department
            .as_ref()
            .is_none_or(|department| view.assignee_department() == Some(department));
        self.accepts_task(&view.task) && department_matches
    }
}
