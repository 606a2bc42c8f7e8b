//! Reference-data catalog entities.
//!
//! Every catalog entity follows one pattern: a storage-assigned integer id, a
//! field that must be unique among active rows, partial-patch updates and
//! either soft or hard deletion. [`CatalogEntity`] captures the per-entity
//! configuration so one service and one set of handlers serve all six types.

mod canton;
mod client;
mod error;
mod named;

use std::fmt;

pub use self::canton::{Canton, CantonDraft, CantonPatch};
pub use self::client::{Client, ClientDraft, ClientPatch};
pub use self::error::CatalogError;
pub use self::named::{AppointmentStatus, NamedDraft, NamedPatch, PaymentMethod, Province, Role};

/// Storage-assigned surrogate key shared by every catalog table.
pub type EntityId = i32;

/// Closed set of catalog entity types, used for error context and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Customer records keyed by email.
    Client,
    /// Staff roles.
    Role,
    /// Top-level administrative regions.
    Province,
    /// Administrative subdivisions of a province.
    Canton,
    /// Accepted payment methods.
    PaymentMethod,
    /// Lifecycle states of an appointment.
    AppointmentStatus,
}

impl EntityKind {
    /// Human-readable singular label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Role => "role",
            Self::Province => "province",
            Self::Canton => "canton",
            Self::PaymentMethod => "payment method",
            Self::AppointmentStatus => "appointment status",
        }
    }

    /// Name of the field that must be unique among active rows.
    #[must_use]
    pub const fn unique_field(self) -> &'static str {
        match self {
            Self::Client => "email",
            _ => "name",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a delete request removes a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Stamp `deleted_at`; the row disappears from every read.
    Soft,
    /// Remove the row outright.
    Hard,
}

/// Fields supplied when creating an entity.
pub trait EntityDraft: Clone + fmt::Debug + Send + Sync + 'static {
    /// Value of the unique field the new row will carry.
    fn unique_value(&self) -> &str;
}

/// Partial update; absent fields are left untouched.
pub trait EntityPatch: Clone + fmt::Debug + Default + Send + Sync + 'static {
    /// Whether the patch supplies no field at all.
    fn is_empty(&self) -> bool;

    /// New value for the unique field, when the patch changes it.
    fn unique_value(&self) -> Option<&str>;
}

/// A uniqueness-checked catalog entity.
pub trait CatalogEntity: Clone + fmt::Debug + Send + Sync + 'static {
    /// Create payload.
    type Draft: EntityDraft;
    /// Update payload.
    type Patch: EntityPatch;

    /// Entity type used in errors and logs.
    const KIND: EntityKind;
    /// Deletion strategy for this table.
    const DELETE_MODE: DeleteMode;

    /// Storage-assigned identifier.
    fn id(&self) -> EntityId;

    /// Current value of the unique field.
    fn unique_value(&self) -> &str;
}
