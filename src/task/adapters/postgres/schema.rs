//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with optimistic-concurrency versioning.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional free-form description.
        #[max_length = 2000]
        description -> Nullable<Varchar>,
        /// Lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Version counter backing the entity tag.
        version -> Int8,
    }
}
