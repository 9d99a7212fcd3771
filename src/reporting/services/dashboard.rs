//! Service computing the master-admin dashboard.

use crate::auth::domain::{AccessError, Session};
use crate::reporting::domain::DashboardStats;
use crate::task::{
    domain::attach_summaries,
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::ports::{UserRepository, UserRepositoryError};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for reporting.
#[derive(Debug, Error)]
pub enum ReportingError {
    /// The session may not view the dashboard.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for reporting.
pub type ReportingResult<T> = Result<T, ReportingError>;

/// Dashboard reporting service.
#[derive(Clone)]
pub struct DashboardService<U, T>
where
    U: UserRepository,
    T: TaskRepository,
{
    users: Arc<U>,
    tasks: Arc<T>,
}

impl<U, T> DashboardService<U, T>
where
    U: UserRepository,
    T: TaskRepository,
{
    /// Creates a new dashboard service.
    #[must_use]
    pub const fn new(users: Arc<U>, tasks: Arc<T>) -> Self {
        Self { users, tasks }
    }

    /// Computes the organisation-wide dashboard.
    ///
    /// Accounts, tasks and departments are read concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin, or the first repository failure.
    pub async fn dashboard(&self, session: &Session) -> ReportingResult<DashboardStats> {
        self.compute(session)
            .await
            .inspect_err(|err| log_failure("dashboard", session, err))
    }

    async fn compute(&self, session: &Session) -> ReportingResult<DashboardStats> {
        session.require_master_admin()?;
        let (users, tasks, departments) = tokio::try_join!(
            async { self.users.list_all().await.map_err(ReportingError::from) },
            async { self.tasks.list_all().await.map_err(ReportingError::from) },
            async {
                self.users
                    .list_departments()
                    .await
                    .map_err(ReportingError::from)
            },
        )?;
        let views = attach_summaries(tasks, &users);
        let stats = DashboardStats::compute(&users, &views, &departments);
        tracing::debug!(
            total_users = stats.total_users,
            total_tasks = stats.total_tasks,
            departments = stats.department_counts.len(),
            "dashboard computed"
        );
        Ok(stats)
    }
}

fn log_failure(operation: &'static str, session: &Session, err: &ReportingError) {
    tracing::warn!(
        operation,
        user_id = %session.user_id(),
        error = %err,
        "reporting operation failed"
    );
}
