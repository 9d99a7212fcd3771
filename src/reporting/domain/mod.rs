//! Dashboard statistics.

use crate::task::domain::{TaskStatus, TaskView};
use crate::user::domain::{DepartmentName, User};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Task counts broken down by workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Tasks not yet started.
    pub pending: usize,
    /// Tasks awaiting review.
    pub in_progress: usize,
    /// Approved tasks.
    pub completed: usize,
}

impl StatusCounts {
    /// Counts one more task in `status`.
    pub const fn record(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
    }

    /// Returns the count for `status`.
    #[must_use]
    pub const fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    /// Returns the number of tasks counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }
}

/// Figures shown on the master-admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Every account, the master-admin included.
    pub total_users: usize,
    /// Accounts with admin rights, the master-admin included.
    pub total_admins: usize,
    /// Every task.
    pub total_tasks: usize,
    /// Accounts per known department; departments without members read 0.
    pub department_counts: BTreeMap<DepartmentName, usize>,
    /// Tasks per status across the whole organisation.
    pub task_status_counts: StatusCounts,
    /// Tasks per status, keyed by the assignee's department.
    pub tasks_per_department: BTreeMap<DepartmentName, StatusCounts>,
}

impl DashboardStats {
    /// Computes the dashboard from the current accounts and tasks.
    ///
    /// Only departments listed in `departments` receive entries. Accounts
    /// and tasks that point anywhere else are left out of the per-department
    /// figures with a warning; tasks whose assignee has no department are
    /// left out silently.
    #[must_use]
    pub fn compute(users: &[User], tasks: &[TaskView], departments: &[DepartmentName]) -> Self {
        let known: BTreeSet<&DepartmentName> = departments.iter().collect();
        let mut department_counts: BTreeMap<DepartmentName, usize> = departments
            .iter()
            .map(|name| (name.clone(), 0))
            .collect();
        let mut tasks_per_department: BTreeMap<DepartmentName, StatusCounts> = departments
            .iter()
            .map(|name| (name.clone(), StatusCounts::default()))
            .collect();

        for user in users {
            let Some(department) = user.department() else {
                continue;
            };
            if !known.contains(department) {
                tracing::warn!(
                    user_id = %user.id(),
                    department = %department,
                    "account references an unknown department"
                );
                continue;
            }
            *department_counts.entry(department.clone()).or_default() += 1;
        }

        let mut task_status_counts = StatusCounts::default();
        for view in tasks {
            let status = view.task.status();
            task_status_counts.record(status);
            let Some(department) = view.assignee_department() else {
                continue;
            };
            if !known.contains(department) {
                tracing::warn!(
                    task_id = %view.task.id(),
                    department = %department,
                    "task assignee references an unknown department"
                );
                continue;
            }
            tasks_per_department
                .entry(department.clone())
                .or_default()
                .record(status);
        }

        Self {
            total_users: users.len(),
            total_admins: users
                .iter()
                .filter(|user| user.role().is_admin_or_above())
                .count(),
            total_tasks: tasks.len(),
            department_counts,
            task_status_counts,
            tasks_per_department,
        }
    }
}
