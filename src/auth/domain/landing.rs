//! Landing targets chosen after a login attempt.

use crate::user::domain::Role;
use serde::{Deserialize, Serialize};

/// Where a client goes after a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landing {
    /// Task list of an ordinary user.
    UserDashboard,
    /// Assignment and review dashboard of a department admin.
    AdminDashboard,
    /// Cross-department dashboard of the master-admin.
    MasterDashboard,
    /// Decoy page shown instead of the login form.
    Decoy,
}

impl Landing {
    /// Returns the dashboard matching a role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::User => Self::UserDashboard,
            Role::Admin => Self::AdminDashboard,
            Role::MasterAdmin => Self::MasterDashboard,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserDashboard => "user_dashboard",
            Self::AdminDashboard => "admin_dashboard",
            Self::MasterDashboard => "master_dashboard",
            Self::Decoy => "decoy",
        }
    }
}
