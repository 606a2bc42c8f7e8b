//! Cantons: name-keyed subdivisions that belong to a province.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CatalogEntity, DeleteMode, EntityDraft, EntityId, EntityKind, EntityPatch};

/// Persisted canton.
///
/// `province_id` is checked by storage only; deleting the province leaves its
/// cantons in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canton {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "id_province")]
    pub province_id: EntityId,
    #[serde(rename = "id_state")]
    pub state_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields required to create a canton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CantonDraft {
    pub name: String,
    pub province_id: EntityId,
    pub state_id: EntityId,
}

/// Partial canton update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CantonPatch {
    pub name: Option<String>,
    pub province_id: Option<EntityId>,
    pub state_id: Option<EntityId>,
}

impl EntityDraft for CantonDraft {
    fn unique_value(&self) -> &str {
        &self.name
    }
}

impl EntityPatch for CantonPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.province_id.is_none() && self.state_id.is_none()
    }

    fn unique_value(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl CatalogEntity for Canton {
    type Draft = CantonDraft;
    type Patch = CantonPatch;

    const KIND: EntityKind = EntityKind::Canton;
    const DELETE_MODE: DeleteMode = DeleteMode::Soft;

    fn id(&self) -> EntityId {
        self.id
    }

    fn unique_value(&self) -> &str {
        &self.name
    }
}
