//! Diesel row models for user account persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Unique login name.
    pub username: String,
    /// Salted password digest.
    pub password_digest: String,
    /// Optional department membership.
    pub department: Option<String>,
    /// Department admin flag.
    pub is_admin: bool,
    /// Master-admin flag.
    pub is_master_admin: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Unique login name.
    pub username: String,
    /// Salted password digest.
    pub password_digest: String,
    /// Optional department membership.
    pub department: Option<String>,
    /// Department admin flag.
    pub is_admin: bool,
    /// Master-admin flag.
    pub is_master_admin: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when an account is updated.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UserChangeset {
    /// Unique login name.
    pub username: String,
    /// Salted password digest.
    pub password_digest: String,
    /// Optional department membership.
    pub department: Option<String>,
    /// Department admin flag.
    pub is_admin: bool,
    /// Master-admin flag.
    pub is_master_admin: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
