//! Service layer for account administration.

use crate::auth::domain::{AccessError, Session};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::user::{
    domain::{
        DepartmentName, NewUserData, Password, PasswordDigest, User, UserDomainError, UserId,
        Username,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    username: String,
    password: String,
    department: Option<String>,
    is_admin: bool,
}

impl CreateUserRequest {
    /// Creates a request for an ordinary account.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            department: None,
            is_admin: false,
        }
    }

    /// Places the account in `department`.
    #[must_use]
    pub fn in_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Marks the account as a department admin.
    #[must_use]
    pub const fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

/// Request payload for replacing an account's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    id: UserId,
    username: String,
    department: Option<String>,
    is_admin: bool,
    password: Option<String>,
}

impl UpdateUserRequest {
    /// Creates a request that sets the username, clears the department and
    /// the admin flag, and keeps the password.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            department: None,
            is_admin: false,
            password: None,
        }
    }

    /// Sets the department.
    #[must_use]
    pub fn in_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets the admin flag.
    #[must_use]
    pub const fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Replaces the password. Blank values leave it unchanged.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Service-level errors for account administration.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// The session may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// The account does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
    /// User repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Task repository operation failed during a cascade.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for account administration.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Account administration service.
#[derive(Clone)]
pub struct UserDirectoryService<U, T, C>
where
    U: UserRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<U, T, C> UserDirectoryService<U, T, C>
where
    U: UserRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub const fn new(users: Arc<U>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            tasks,
            clock,
        }
    }

    /// Creates an account.
    ///
    /// The master-admin may create any account. An admin may only create
    /// ordinary accounts in their own department; when the request names no
    /// department the admin's is used.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] for invalid input,
    /// [`UserDirectoryError::Access`] when the caller exceeds their scope and
    /// [`UserRepositoryError::DuplicateUsername`] when the name is taken.
    pub async fn create_user(
        &self,
        session: &Session,
        request: CreateUserRequest,
    ) -> UserDirectoryResult<User> {
        self.create(session, request)
            .await
            .inspect_err(|err| log_failure("create_user", session, err))
    }

    async fn create(
        &self,
        session: &Session,
        request: CreateUserRequest,
    ) -> UserDirectoryResult<User> {
        session.require_admin()?;

        let username = Username::new(request.username)?;
        let password = Password::new(request.password)?;
        let requested_department = request
            .department
            .map(DepartmentName::new)
            .transpose()?;

        let department = if session.is_master_admin() {
            requested_department
        } else {
            if request.is_admin {
                return Err(AccessError::MasterAdminRequired.into());
            }
            let own = session.department().cloned();
            match requested_department {
                Some(requested) if own.as_ref() != Some(&requested) => {
                    return Err(AccessError::ForeignDepartment(requested).into());
                }
                _ => own,
            }
        };

        let user = User::new(
            NewUserData {
                username,
                password: PasswordDigest::derive(&password)?,
                department,
                is_admin: request.is_admin,
                is_master_admin: false,
            },
            &*self.clock,
        );
        self.users.store(&user).await?;
        tracing::info!(
            user_id = %user.id(),
            username = %user.username(),
            role = %user.role(),
            "user created"
        );
        Ok(user)
    }

    /// Replaces an account's username, department and admin flag, and the
    /// password when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin, [`UserDirectoryError::UnknownUser`] for missing
    /// accounts and [`UserRepositoryError::DuplicateUsername`] when the new
    /// name belongs to another account.
    pub async fn update_user(
        &self,
        session: &Session,
        request: UpdateUserRequest,
    ) -> UserDirectoryResult<User> {
        self.update(session, request)
            .await
            .inspect_err(|err| log_failure("update_user", session, err))
    }

    async fn update(
        &self,
        session: &Session,
        request: UpdateUserRequest,
    ) -> UserDirectoryResult<User> {
        session.require_master_admin()?;

        let username = Username::new(request.username)?;
        let department = request
            .department
            .map(DepartmentName::new)
            .transpose()?;
        let password = request
            .password
            .filter(|value| !value.trim().is_empty())
            .map(Password::new)
            .transpose()?;

        let mut user = self.require_user(request.id).await?;
        let clock = &*self.clock;
        user.rename(username, clock);
        user.move_to_department(department, clock);
        user.set_admin(request.is_admin, clock);
        if let Some(password) = password {
            user.change_password(PasswordDigest::derive(&password)?, clock);
        }

        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id(), "user updated");
        Ok(user)
    }

    /// Deletes an account together with every task it assigned or received.
    ///
    /// Returns the number of tasks removed.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin and [`AccessError::ProtectedAccount`] for the caller's
    /// own account or any master-admin account.
    pub async fn delete_user(&self, session: &Session, id: UserId) -> UserDirectoryResult<usize> {
        self.delete(session, id)
            .await
            .inspect_err(|err| log_failure("delete_user", session, err))
    }

    async fn delete(&self, session: &Session, id: UserId) -> UserDirectoryResult<usize> {
        session.require_master_admin()?;
        if id == session.user_id() {
            return Err(AccessError::ProtectedAccount(id).into());
        }
        let user = self.require_user(id).await?;
        if user.is_master_admin() {
            return Err(AccessError::ProtectedAccount(id).into());
        }

        let tasks_removed = self.tasks.delete_involving(&[id]).await?;
        self.users.delete(id).await?;
        tracing::info!(user_id = %id, tasks_removed, "user deleted");
        Ok(tasks_removed)
    }

    /// Lists every account ordered by department, then username.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin.
    pub async fn list_users(&self, session: &Session) -> UserDirectoryResult<Vec<User>> {
        session
            .require_master_admin()
            .map_err(UserDirectoryError::from)
            .inspect_err(|err| log_failure("list_users", session, err))?;
        Ok(self.users.list_all().await?)
    }

    /// Lists the admin and master-admin accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin.
    pub async fn list_admins(&self, session: &Session) -> UserDirectoryResult<Vec<User>> {
        let users = self.list_users(session).await?;
        Ok(users
            .into_iter()
            .filter(|user| user.role().is_admin_or_above())
            .collect())
    }

    /// Lists the accounts the caller may assign tasks to.
    ///
    /// Admins see the ordinary accounts of their department; the
    /// master-admin sees every account except master-admins.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AdminRequired`] for ordinary users.
    pub async fn assignable_users(&self, session: &Session) -> UserDirectoryResult<Vec<User>> {
        session
            .require_admin()
            .map_err(UserDirectoryError::from)
            .inspect_err(|err| log_failure("assignable_users", session, err))?;

        if session.is_master_admin() {
            let users = self.users.list_all().await?;
            return Ok(users
                .into_iter()
                .filter(|user| !user.is_master_admin())
                .collect());
        }

        let Some(department) = session.department() else {
            return Ok(Vec::new());
        };
        let members = self.users.list_by_department(department).await?;
        Ok(members
            .into_iter()
            .filter(|user| !user.role().is_admin_or_above())
            .collect())
    }

    /// Finds an account by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when the lookup fails.
    pub async fn find_user(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    async fn require_user(&self, id: UserId) -> UserDirectoryResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserDirectoryError::UnknownUser(id))
    }
}

fn log_failure(operation: &'static str, session: &Session, err: &UserDirectoryError) {
    tracing::warn!(
        operation,
        user_id = %session.user_id(),
        error = %err,
        "directory operation failed"
    );
}
