//! Error types for session access checks.

use crate::user::domain::{DepartmentName, UserId};
use thiserror::Error;

/// Errors returned when a session lacks the rights for an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The operation needs an admin or master-admin session.
    #[error("admin privileges required")]
    AdminRequired,

    /// The operation needs a master-admin session.
    #[error("master-admin privileges required")]
    MasterAdminRequired,

    /// The target account is outside the caller's department.
    #[error("user {0} is outside the caller's department")]
    OutsideDepartment(UserId),

    /// The request names a department other than the caller's own.
    #[error("department {0} is outside the caller's scope")]
    ForeignDepartment(DepartmentName),

    /// Only the assignee may act on this task.
    #[error("only the assignee may perform this action")]
    NotAssignee,

    /// Only the assigning admin may act on this task.
    #[error("only the assigning admin may perform this action")]
    NotAssigner,

    /// The named assigner does not hold admin rights.
    #[error("user {0} cannot assign tasks without admin rights")]
    AssignerNotAdmin(UserId),

    /// The account cannot be deleted.
    #[error("account {0} is protected from deletion")]
    ProtectedAccount(UserId),
}
