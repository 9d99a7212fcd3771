//! Diesel schema for task persistence.

diesel::table! {
    /// Assigned tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Assigning admin.
        assigned_by -> Uuid,
        /// Assignee.
        assigned_to -> Uuid,
        /// Free-form location string.
        coordinates -> Text,
        /// Due date.
        due_date -> Date,
        /// Optional storage path of the attached document.
        #[max_length = 512]
        document -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
