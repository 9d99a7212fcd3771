//! Account role derived from the stored admin flags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary user who works on assigned tasks.
    User,
    /// Department admin who assigns and reviews tasks.
    Admin,
    /// Super-user managing every department.
    MasterAdmin,
}

impl Role {
    /// Derives the role from the persisted flags. The master flag wins.
    #[must_use]
    pub const fn from_flags(is_admin: bool, is_master_admin: bool) -> Self {
        if is_master_admin {
            Self::MasterAdmin
        } else if is_admin {
            Self::Admin
        } else {
            Self::User
        }
    }

    /// Returns `true` for admins and master-admins.
    #[must_use]
    pub const fn is_admin_or_above(self) -> bool {
        matches!(self, Self::Admin | Self::MasterAdmin)
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::MasterAdmin => "master_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
