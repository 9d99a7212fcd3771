//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the storage limit.
    #[error("username exceeds 100 character limit: {0}")]
    UsernameTooLong(String),

    /// The department name is empty after trimming.
    #[error("department name must not be empty")]
    EmptyDepartment,

    /// The department name exceeds the storage limit.
    #[error("department name exceeds 100 character limit: {0}")]
    DepartmentTooLong(String),

    /// The password is shorter than the minimum length.
    #[error("password must be at least {minimum} characters long")]
    PasswordTooShort {
        /// Minimum accepted length in characters.
        minimum: usize,
    },

    /// A stored password hash is not in bcrypt's modular crypt format.
    #[error("malformed password digest")]
    MalformedPasswordDigest,

    /// The password hasher failed.
    #[error("password hashing failed: {0}")]
    PasswordHashing(String),
}
