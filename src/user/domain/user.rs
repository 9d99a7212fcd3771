//! User account aggregate root.

use super::{DepartmentName, PasswordDigest, Role, UserId, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// User account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password: PasswordDigest,
    department: Option<DepartmentName>,
    is_admin: bool,
    is_master_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserData {
    /// Login name.
    pub username: Username,
    /// Password digest.
    pub password: PasswordDigest,
    /// Department membership, if any.
    pub department: Option<DepartmentName>,
    /// Whether the account administers its department.
    pub is_admin: bool,
    /// Whether the account is the master-admin.
    pub is_master_admin: bool,
}

/// Parameter object for reconstructing a persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted login name.
    pub username: Username,
    /// Persisted password digest.
    pub password: PasswordDigest,
    /// Persisted department membership.
    pub department: Option<DepartmentName>,
    /// Persisted admin flag.
    pub is_admin: bool,
    /// Persisted master-admin flag.
    pub is_master_admin: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new account.
    #[must_use]
    pub fn new(data: NewUserData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            username: data.username,
            password: data.password,
            department: data.department,
            is_admin: data.is_admin,
            is_master_admin: data.is_master_admin,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            password: data.password,
            department: data.department,
            is_admin: data.is_admin,
            is_master_admin: data.is_master_admin,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the password digest.
    #[must_use]
    pub const fn password(&self) -> &PasswordDigest {
        &self.password
    }

    /// Returns the department, if any.
    #[must_use]
    pub const fn department(&self) -> Option<&DepartmentName> {
        self.department.as_ref()
    }

    /// Returns the admin flag.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns the master-admin flag.
    #[must_use]
    pub const fn is_master_admin(&self) -> bool {
        self.is_master_admin
    }

    /// Returns the role derived from the flags.
    #[must_use]
    pub const fn role(&self) -> Role {
        Role::from_flags(self.is_admin, self.is_master_admin)
    }

    /// Returns `true` when the account belongs to `department`.
    #[must_use]
    pub fn belongs_to(&self, department: &DepartmentName) -> bool {
        self.department.as_ref() == Some(department)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the embeddable summary of this account.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            department: self.department.clone(),
        }
    }

    /// Replaces the login name.
    pub fn rename(&mut self, username: Username, clock: &impl Clock) {
        self.username = username;
        self.touch(clock);
    }

    /// Moves the account into another department.
    pub fn move_to_department(&mut self, department: Option<DepartmentName>, clock: &impl Clock) {
        self.department = department;
        self.touch(clock);
    }

    /// Sets the department admin flag.
    pub fn set_admin(&mut self, is_admin: bool, clock: &impl Clock) {
        self.is_admin = is_admin;
        self.touch(clock);
    }

    /// Replaces the password digest.
    pub fn change_password(&mut self, password: PasswordDigest, clock: &impl Clock) {
        self.password = password;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Identity fields of a user embedded alongside task records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Account identifier.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// Department membership, if any.
    pub department: Option<DepartmentName>,
}
