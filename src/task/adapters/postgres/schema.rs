//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records owned by charities.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning charity identifier.
        charity_id -> Uuid,
        /// Requesting or assigned benefactor identifier.
        assignee_id -> Nullable<Uuid>,
        /// Task lifecycle state.
        #[max_length = 20]
        state -> Varchar,
        /// Task title, duplicated from `details` for filtering.
        #[max_length = 60]
        title -> Varchar,
        /// Volunteer gender restriction, duplicated from `details` for filtering.
        #[max_length = 10]
        gender_limit -> Nullable<Varchar>,
        /// Descriptive task fields.
        details -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
