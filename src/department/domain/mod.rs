//! Department listings, provisioning defaults and deletion reports.

use crate::user::domain::{DepartmentName, UserDomainError, Username};
use serde::Serialize;

/// Password given to the admin account provisioned with a new department.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin@123";

/// Department name with the number of accounts in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentSummary {
    /// Department name.
    pub name: DepartmentName,
    /// Number of member accounts.
    pub user_count: usize,
}

/// Counts reported after a department is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DepartmentDeletion {
    /// Tasks removed because a member assigned or received them.
    pub tasks_removed: usize,
    /// Member accounts removed.
    pub users_removed: usize,
    /// Master-admin accounts detached from the department instead of
    /// being removed.
    pub users_detached: usize,
}

/// Returns the username of the admin provisioned for `department`:
/// `Admin_` followed by the name with each whitespace run replaced by `_`.
///
/// # Errors
///
/// Returns [`UserDomainError::UsernameTooLong`] when the result exceeds the
/// username limit.
pub fn admin_username_for(department: &DepartmentName) -> Result<Username, UserDomainError> {
    let joined = department
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    Username::new(format!("Admin_{joined}"))
}
