//! Authenticated identity passed explicitly to services.

use super::{AccessError, Landing};
use crate::user::domain::{DepartmentName, Role, User, UserId, Username};
use serde::{Deserialize, Serialize};

/// Authenticated identity of the caller.
///
/// The web front end keeps this as a JSON blob in browser storage; services
/// receive it as an argument and check the role themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    username: Username,
    department: Option<DepartmentName>,
    role: Role,
}

impl Session {
    /// Creates a session for an authenticated account.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id(),
            username: user.username().clone(),
            department: user.department().cloned(),
            role: user.role(),
        }
    }

    /// Returns the caller's account identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller's username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the caller's department, if any.
    #[must_use]
    pub const fn department(&self) -> Option<&DepartmentName> {
        self.department.as_ref()
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the landing dashboard for this session.
    #[must_use]
    pub const fn landing(&self) -> Landing {
        Landing::for_role(self.role)
    }

    /// Returns `true` for the master-admin.
    #[must_use]
    pub const fn is_master_admin(&self) -> bool {
        matches!(self.role, Role::MasterAdmin)
    }

    /// Checks that the caller is an admin or the master-admin.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AdminRequired`] for ordinary users.
    pub const fn require_admin(&self) -> Result<(), AccessError> {
        if self.role.is_admin_or_above() {
            Ok(())
        } else {
            Err(AccessError::AdminRequired)
        }
    }

    /// Checks that the caller is the master-admin.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone else.
    pub const fn require_master_admin(&self) -> Result<(), AccessError> {
        if self.is_master_admin() {
            Ok(())
        } else {
            Err(AccessError::MasterAdminRequired)
        }
    }

    /// Checks that `user` shares the caller's department, unless the caller
    /// is the master-admin.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::OutsideDepartment`] when the departments differ
    /// or the caller has none.
    pub fn require_same_department(&self, user: &User) -> Result<(), AccessError> {
        if self.is_master_admin() {
            return Ok(());
        }
        match self.department.as_ref() {
            Some(department) if user.belongs_to(department) => Ok(()),
            _ => Err(AccessError::OutsideDepartment(user.id())),
        }
    }
}
