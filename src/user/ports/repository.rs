//! Repository port for user account persistence and department queries.

use crate::user::domain::{DepartmentName, User, UserId, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// already exists or [`UserRepositoryError::DuplicateUsername`] when the
    /// username is taken.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the account does not
    /// exist or [`UserRepositoryError::DuplicateUsername`] when the new
    /// username belongs to another account.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the account does not
    /// exist.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<()>;

    /// Deletes every listed account that exists and returns how many were
    /// removed.
    async fn delete_many(&self, ids: &[UserId]) -> UserRepositoryResult<usize>;

    /// Finds an account by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds an account by exact username.
    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>>;

    /// Returns every account ordered by department, then username.
    /// Accounts without a department sort first.
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>>;

    /// Returns the accounts of one department ordered by username.
    async fn list_by_department(
        &self,
        department: &DepartmentName,
    ) -> UserRepositoryResult<Vec<User>>;

    /// Returns the distinct department names in ascending order.
    async fn list_departments(&self) -> UserRepositoryResult<Vec<DepartmentName>>;

    /// Moves every account of `from` into `to` and returns the number of
    /// accounts changed.
    async fn rename_department(
        &self,
        from: &DepartmentName,
        to: &DepartmentName,
    ) -> UserRepositoryResult<usize>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// An account with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// An account with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// The account was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
