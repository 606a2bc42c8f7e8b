//! Internal Diesel row structs for catalog tables.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{appointment_status, cantons, clientes, payment_methods, provinces, roles};

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

/// Row struct for reading from the clientes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clientes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClientRow {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub direccion: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clientes)]
pub(crate) struct NewClientRow<'a> {
    pub nombre: &'a str,
    pub email: &'a str,
    pub telefono: &'a str,
    pub direccion: Option<&'a str>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// Partial client update; `direccion: Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = clientes)]
pub(crate) struct ClientChangeset<'a> {
    pub nombre: Option<&'a str>,
    pub email: Option<&'a str>,
    pub telefono: Option<&'a str>,
    pub direccion: Option<Option<&'a str>>,
    pub fecha_actualizacion: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Cantons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cantons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CantonRow {
    pub id: i32,
    pub name: String,
    pub id_province: i32,
    pub id_state: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cantons)]
pub(crate) struct NewCantonRow<'a> {
    pub name: &'a str,
    pub id_province: i32,
    pub id_state: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = cantons)]
pub(crate) struct CantonChangeset<'a> {
    pub name: Option<&'a str>,
    pub id_province: Option<i32>,
    pub id_state: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Name-keyed tables sharing one column layout
// ---------------------------------------------------------------------------

macro_rules! named_table_models {
    ($table:ident => $row:ident, $new_row:ident, $changeset:ident) => {
        #[derive(Debug, Clone, Queryable, Selectable)]
        #[diesel(table_name = $table)]
        #[diesel(check_for_backend(diesel::pg::Pg))]
        pub(crate) struct $row {
            pub id: i32,
            pub name: String,
            pub id_state: i32,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
            pub deleted_at: Option<DateTime<Utc>>,
        }

        #[derive(Debug, Clone, Insertable)]
        #[diesel(table_name = $table)]
        pub(crate) struct $new_row<'a> {
            pub name: &'a str,
            pub id_state: i32,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        #[derive(Debug, Clone, AsChangeset)]
        #[diesel(table_name = $table)]
        pub(crate) struct $changeset<'a> {
            pub name: Option<&'a str>,
            pub id_state: Option<i32>,
            pub updated_at: DateTime<Utc>,
        }
    };
}

named_table_models!(roles => RoleRow, NewRoleRow, RoleChangeset);
named_table_models!(provinces => ProvinceRow, NewProvinceRow, ProvinceChangeset);
named_table_models!(payment_methods => PaymentMethodRow, NewPaymentMethodRow, PaymentMethodChangeset);
named_table_models!(
    appointment_status => AppointmentStatusRow, NewAppointmentStatusRow, AppointmentStatusChangeset
);
