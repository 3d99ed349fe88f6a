//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts allowed to call the API.
    users (login) {
        /// Primary key: unique login.
        login -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// `USER` or `ADMIN`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Engineers that may be linked to houses.
    engineers (id) {
        /// Identity primary key.
        id -> Int8,
        /// Non-empty display name.
        name -> Varchar,
    }
}

diesel::table! {
    /// Architects that may be linked to houses.
    architects (id) {
        /// Identity primary key.
        id -> Int8,
        /// Non-empty display name.
        name -> Varchar,
    }
}

diesel::table! {
    /// House projects.
    ///
    /// Links are plain foreign keys with `ON DELETE RESTRICT`; the engineer
    /// and architect tables hold no back-references.
    houses (id) {
        /// Identity primary key.
        id -> Int8,
        /// Non-empty project name.
        project_name -> Varchar,
        /// Linked engineer, if any.
        engineer_id -> Nullable<Int8>,
        /// Linked architect, if any.
        architect_id -> Nullable<Int8>,
    }
}

diesel::joinable!(houses -> engineers (engineer_id));
diesel::joinable!(houses -> architects (architect_id));

diesel::allow_tables_to_appear_in_same_query!(users, engineers, architects, houses);
