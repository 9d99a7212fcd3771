//! Service layer for listing, creating, renaming and deleting departments.

use crate::auth::domain::{AccessError, Session};
use crate::department::domain::{
    DEFAULT_ADMIN_PASSWORD, DepartmentDeletion, DepartmentSummary, admin_username_for,
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::user::{
    domain::{
        DepartmentName, NewUserData, Password, PasswordDigest, User, UserDomainError, UserId,
        Username,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for department administration.
#[derive(Debug, Error)]
pub enum DepartmentError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// The session may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Another department already uses the name, ignoring case.
    #[error("department already exists: {0}")]
    AlreadyExists(DepartmentName),
    /// No account belongs to the department.
    #[error("unknown department: {0}")]
    UnknownDepartment(DepartmentName),
    /// The provisioned admin username is taken.
    #[error("admin account already exists: {0}")]
    AdminAccountExists(Username),
    /// User repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Task repository operation failed during a cascade.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for department administration.
pub type DepartmentResult<T> = Result<T, DepartmentError>;

/// Department administration service.
#[derive(Clone)]
pub struct DepartmentService<U, T, C>
where
    U: UserRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<U, T, C> DepartmentService<U, T, C>
where
    U: UserRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new department service.
    #[must_use]
    pub const fn new(users: Arc<U>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            tasks,
            clock,
        }
    }

    /// Lists departments in name order with their account counts.
    ///
    /// # Errors
    ///
    /// Returns [`DepartmentError::Repository`] when the accounts cannot be
    /// read.
    pub async fn list(&self) -> DepartmentResult<Vec<DepartmentSummary>> {
        let users = self.users.list_all().await?;
        let mut counts: BTreeMap<DepartmentName, usize> = BTreeMap::new();
        for department in users.iter().filter_map(User::department) {
            *counts.entry(department.clone()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(name, user_count)| DepartmentSummary { name, user_count })
            .collect())
    }

    /// Creates a department by provisioning its admin account.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin, [`DepartmentError::AlreadyExists`] when the name is in
    /// use ignoring case and [`DepartmentError::AdminAccountExists`] when the
    /// admin username is taken.
    pub async fn create(&self, session: &Session, name: &str) -> DepartmentResult<User> {
        self.provision(session, name)
            .await
            .inspect_err(|err| log_failure("create", session, err))
    }

    async fn provision(&self, session: &Session, name: &str) -> DepartmentResult<User> {
        session.require_master_admin()?;
        let department = DepartmentName::new(name)?;

        let existing = self.users.list_departments().await?;
        if let Some(clash) = existing
            .into_iter()
            .find(|known| known.matches_ignoring_case(&department))
        {
            return Err(DepartmentError::AlreadyExists(clash));
        }

        let username = admin_username_for(&department)?;
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(DepartmentError::AdminAccountExists(username));
        }

        let password = Password::new(DEFAULT_ADMIN_PASSWORD)?;
        let admin = User::new(
            NewUserData {
                username,
                password: PasswordDigest::derive(&password)?,
                department: Some(department),
                is_admin: true,
                is_master_admin: false,
            },
            &*self.clock,
        );
        self.users.store(&admin).await?;
        tracing::info!(
            department = ?admin.department(),
            admin = %admin.username(),
            "department created"
        );
        Ok(admin)
    }

    /// Moves every account of `from` into `to` and returns how many moved.
    ///
    /// Renaming a department to its current name changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin, [`DepartmentError::UnknownDepartment`] when `from` has
    /// no members and [`DepartmentError::AlreadyExists`] when `to` clashes
    /// with another department ignoring case.
    pub async fn rename(
        &self,
        session: &Session,
        from: &str,
        to: &str,
    ) -> DepartmentResult<usize> {
        self.move_members(session, from, to)
            .await
            .inspect_err(|err| log_failure("rename", session, err))
    }

    async fn move_members(
        &self,
        session: &Session,
        from: &str,
        to: &str,
    ) -> DepartmentResult<usize> {
        session.require_master_admin()?;
        let current = DepartmentName::new(from)?;
        let target = DepartmentName::new(to)?;
        if current == target {
            return Ok(0);
        }

        let existing = self.users.list_departments().await?;
        if !existing.contains(&current) {
            return Err(DepartmentError::UnknownDepartment(current));
        }
        if let Some(clash) = existing
            .into_iter()
            .find(|known| *known != current && known.matches_ignoring_case(&target))
        {
            return Err(DepartmentError::AlreadyExists(clash));
        }

        let moved = self.users.rename_department(&current, &target).await?;
        tracing::info!(from = %current, to = %target, moved, "department renamed");
        Ok(moved)
    }

    /// Deletes a department: every task a member assigned or received, then
    /// every member account. Master-admin members are detached instead of
    /// deleted.
    ///
    /// Failures part-way through are returned as they happen; earlier
    /// deletions are not undone.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin and [`DepartmentError::UnknownDepartment`] when no
    /// account belongs to the department.
    pub async fn delete(
        &self,
        session: &Session,
        name: &str,
    ) -> DepartmentResult<DepartmentDeletion> {
        self.remove(session, name)
            .await
            .inspect_err(|err| log_failure("delete", session, err))
    }

    async fn remove(
        &self,
        session: &Session,
        name: &str,
    ) -> DepartmentResult<DepartmentDeletion> {
        session.require_master_admin()?;
        let department = DepartmentName::new(name)?;

        let members = self.users.list_by_department(&department).await?;
        if members.is_empty() {
            return Err(DepartmentError::UnknownDepartment(department));
        }
        let (masters, removable): (Vec<User>, Vec<User>) =
            members.into_iter().partition(User::is_master_admin);
        let removable_ids: Vec<UserId> = removable.iter().map(User::id).collect();

        let tasks_removed = self.tasks.delete_involving(&removable_ids).await?;
        let users_removed = self.users.delete_many(&removable_ids).await?;

        let mut users_detached = 0;
        for mut master in masters {
            master.move_to_department(None, &*self.clock);
            self.users.update(&master).await?;
            users_detached += 1;
        }

        let report = DepartmentDeletion {
            tasks_removed,
            users_removed,
            users_detached,
        };
        tracing::info!(
            department = %department,
            tasks_removed,
            users_removed,
            users_detached,
            "department deleted"
        );
        Ok(report)
    }
}

fn log_failure(operation: &'static str, session: &Session, err: &DepartmentError) {
    tracing::warn!(
        operation,
        user_id = %session.user_id(),
        error = %err,
        "department operation failed"
    );
}
