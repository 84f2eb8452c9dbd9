//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly.
//! Each service owns one table in its own database; the user service never
//! touches `tasks` and the task service never touches `users`.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Store-assigned surrogate key.
        id -> Int8,
        /// External identifier exposed to clients (unique).
        uuid -> Uuid,
        name -> Text,
        /// Unique across all users.
        email -> Text,
    }
}

diesel::table! {
    /// Tasks with an optional assignee.
    tasks (id) {
        /// Store-assigned surrogate key.
        id -> Int8,
        /// External identifier exposed to clients (unique).
        uuid -> Uuid,
        /// External identifier of a user in the user service. Not a foreign
        /// key: the two tables live in different databases.
        assignee_uuid -> Nullable<Uuid>,
        /// Task description (max 1000 characters).
        description -> Varchar,
    }
}
