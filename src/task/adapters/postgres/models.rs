//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Assigning admin.
    pub assigned_by: uuid::Uuid,
    /// Assignee.
    pub assigned_to: uuid::Uuid,
    /// Free-form location string.
    pub coordinates: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Attached document path.
    pub document: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Assigning admin.
    pub assigned_by: uuid::Uuid,
    /// Assignee.
    pub assigned_to: uuid::Uuid,
    /// Free-form location string.
    pub coordinates: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Attached document path.
    pub document: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a task is updated.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Workflow status.
    pub status: String,
    /// Attached document path.
    pub document: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
