//! Diesel table definitions for the catalog schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Shared status labels referenced by `id_state` columns.
    general_status (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Customers. Hard deleted; unique by `email`.
    clientes (id) {
        id -> Int4,
        nombre -> Varchar,
        email -> Varchar,
        telefono -> Varchar,
        direccion -> Nullable<Varchar>,
        fecha_creacion -> Timestamptz,
        fecha_actualizacion -> Timestamptz,
    }
}

diesel::table! {
    roles (id) {
        id -> Int4,
        name -> Varchar,
        id_state -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Soft-delete marker; `NULL` while active.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    provinces (id) {
        id -> Int4,
        name -> Varchar,
        id_state -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    cantons (id) {
        id -> Int4,
        name -> Varchar,
        id_province -> Int4,
        id_state -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    payment_methods (id) {
        id -> Int4,
        name -> Varchar,
        id_state -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    appointment_status (id) {
        id -> Int4,
        name -> Varchar,
        id_state -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(roles -> general_status (id_state));
diesel::joinable!(provinces -> general_status (id_state));
diesel::joinable!(cantons -> general_status (id_state));
diesel::joinable!(cantons -> provinces (id_province));
diesel::joinable!(payment_methods -> general_status (id_state));
diesel::joinable!(appointment_status -> general_status (id_state));

diesel::allow_tables_to_appear_in_same_query!(
    general_status,
    clientes,
    roles,
    provinces,
    cantons,
    payment_methods,
    appointment_status,
);
