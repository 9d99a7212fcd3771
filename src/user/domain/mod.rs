//! Domain model for user accounts and department membership.
//!
//! Accounts carry a bcrypt password hash, an optional department and the
//! two role flags. Departments have no table of their own: they are the
//! distinct department values held by accounts.

mod error;
mod ids;
mod names;
mod password;
mod role;
mod user;

pub use error::UserDomainError;
pub use ids::UserId;
pub use names::{DepartmentName, Username};
pub use password::{MIN_PASSWORD_LENGTH, Password, PasswordDigest};
pub use role::Role;
pub use user::{NewUserData, PersistedUserData, User, UserSummary};
