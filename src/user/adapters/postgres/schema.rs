//! Diesel schema for user account persistence.

diesel::table! {
    /// User account records.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 100]
        username -> Varchar,
        /// Salted password digest.
        #[max_length = 128]
        password_digest -> Varchar,
        /// Optional department membership.
        #[max_length = 100]
        department -> Nullable<Varchar>,
        /// Department admin flag.
        is_admin -> Bool,
        /// Master-admin flag.
        is_master_admin -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
