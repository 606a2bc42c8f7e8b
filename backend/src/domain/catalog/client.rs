//! Customer records.
//!
//! Clients are the one hard-deleted catalog entity: they carry no status
//! reference and no `deleted_at` marker, and their unique field is `email`.
//! The wire names keep the Spanish column names existing consumers expect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CatalogEntity, DeleteMode, EntityDraft, EntityId, EntityKind, EntityPatch};

/// Persisted client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// Fields required to register a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
}

/// Partial client update.
///
/// `address` distinguishes "leave alone" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Option<String>>,
}

impl EntityDraft for ClientDraft {
    fn unique_value(&self) -> &str {
        &self.email
    }
}

impl EntityPatch for ClientPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.address.is_none()
    }

    fn unique_value(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl CatalogEntity for Client {
    type Draft = ClientDraft;
    type Patch = ClientPatch;

    const KIND: EntityKind = EntityKind::Client;
    const DELETE_MODE: DeleteMode = DeleteMode::Hard;

    fn id(&self) -> EntityId {
        self.id
    }

    fn unique_value(&self) -> &str {
        &self.email
    }
}
