//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes a table, update this file alongside it (or regenerate
//! it with `diesel print-schema`).

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique (enforced by `users_email_key`).
        email -> Varchar,
        /// Argon2 PHC string.
        password -> Varchar,
        /// `user` or `admin`.
        role -> Varchar,
        /// Adopted pets, in adoption order.
        pets -> Array<Uuid>,
        /// Array of `{name, reference}` objects.
        documents -> Jsonb,
        last_connection -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pets available for, or already placed by, adoption.
    ///
    /// A check constraint keeps `adopted` and `owner_id` consistent.
    pets (id) {
        id -> Uuid,
        name -> Varchar,
        specie -> Varchar,
        birth_date -> Date,
        adopted -> Bool,
        owner_id -> Nullable<Uuid>,
        image -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Immutable adoption history.
    adoptions (id) {
        id -> Uuid,
        owner_id -> Uuid,
        pet_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, pets, adoptions);
