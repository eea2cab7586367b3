//! Diesel schema for profile persistence.

diesel::table! {
    /// Charity profiles, one per account.
    charities (id) {
        /// Charity identifier.
        id -> Uuid,
        /// Owning account identifier.
        account_id -> Uuid,
        /// Display name.
        #[max_length = 50]
        name -> Varchar,
        /// Unique registration number.
        #[max_length = 10]
        registration_number -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Benefactor profiles, one per account.
    benefactors (id) {
        /// Benefactor identifier.
        id -> Uuid,
        /// Owning account identifier.
        account_id -> Uuid,
        /// Experience tier (0 beginner, 1 intermediate, 2 expert).
        experience -> Int2,
        /// Weekly free time in hours.
        free_time_per_week -> Int2,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
