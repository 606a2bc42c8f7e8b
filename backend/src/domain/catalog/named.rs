//! Name-keyed, soft-deleted catalog entities that reference `general_status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CatalogEntity, DeleteMode, EntityDraft, EntityId, EntityKind, EntityPatch};

/// Create payload shared by the name-keyed entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDraft {
    pub name: String,
    pub state_id: EntityId,
}

/// Partial update shared by the name-keyed entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedPatch {
    pub name: Option<String>,
    pub state_id: Option<EntityId>,
}

impl EntityDraft for NamedDraft {
    fn unique_value(&self) -> &str {
        &self.name
    }
}

impl EntityPatch for NamedPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.state_id.is_none()
    }

    fn unique_value(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

macro_rules! named_entity {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub id: EntityId,
            pub name: String,
            #[serde(rename = "id_state")]
            pub state_id: EntityId,
            /// Label joined from `general_status`, when the table exposes it.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub state_name: Option<String>,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub deleted_at: Option<DateTime<Utc>>,
        }

        impl CatalogEntity for $name {
            type Draft = NamedDraft;
            type Patch = NamedPatch;

            const KIND: EntityKind = $kind;
            const DELETE_MODE: DeleteMode = DeleteMode::Soft;

            fn id(&self) -> EntityId {
                self.id
            }

            fn unique_value(&self) -> &str {
                &self.name
            }
        }
    };
}

named_entity! {
    /// Staff role.
    Role => EntityKind::Role
}

named_entity! {
    /// Province; parent of cantons.
    Province => EntityKind::Province
}

named_entity! {
    /// Accepted payment method. Reads never carry `state_name`.
    PaymentMethod => EntityKind::PaymentMethod
}

named_entity! {
    /// Appointment lifecycle state.
    AppointmentStatus => EntityKind::AppointmentStatus
}
