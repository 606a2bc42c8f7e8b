//! Per-entity storage behaviour for the in-memory tables.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{InMemoryCatalog, Table};
use crate::domain::catalog::{
    AppointmentStatus, Canton, CantonDraft, CantonPatch, CatalogEntity, Client, ClientDraft,
    ClientPatch, EntityId, NamedDraft, NamedPatch, PaymentMethod, Province, Role,
};

/// Foreign keys a write refers to; `None` means "not touched".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForeignKeys {
    pub state_id: Option<EntityId>,
    pub province_id: Option<EntityId>,
}

/// Storage hooks the in-memory catalog needs for each entity.
pub trait StoredEntity: CatalogEntity {
    /// Whether reads carry the joined `general_status` label.
    const STATE_LABEL: bool;

    #[doc(hidden)]
    fn table(catalog: &InMemoryCatalog) -> &Mutex<Table<Self>>;

    /// Build the stored row for a fresh id.
    fn materialize(id: EntityId, draft: &Self::Draft, now: DateTime<Utc>) -> Self;

    /// Apply a non-empty patch, stamping the modification time.
    fn apply(&mut self, patch: &Self::Patch, now: DateTime<Utc>);

    fn draft_keys(draft: &Self::Draft) -> ForeignKeys;

    fn patch_keys(patch: &Self::Patch) -> ForeignKeys;

    fn state_id(&self) -> Option<EntityId>;

    fn set_state_name(&mut self, label: Option<String>);

    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn mark_deleted(&mut self, now: DateTime<Utc>);

    /// Natural read order; id order unless overridden.
    fn order(_rows: &mut [Self]) {}
}

impl StoredEntity for Client {
    const STATE_LABEL: bool = false;

    fn table(catalog: &InMemoryCatalog) -> &Mutex<Table<Self>> {
        &catalog.clients
    }

    fn materialize(id: EntityId, draft: &ClientDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            address: draft.address.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: &ClientPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        if let Some(phone) = &patch.phone {
            self.phone.clone_from(phone);
        }
        if let Some(address) = &patch.address {
            self.address.clone_from(address);
        }
        self.updated_at = now;
    }

    fn draft_keys(_draft: &ClientDraft) -> ForeignKeys {
        ForeignKeys::default()
    }

    fn patch_keys(_patch: &ClientPatch) -> ForeignKeys {
        ForeignKeys::default()
    }

    fn state_id(&self) -> Option<EntityId> {
        None
    }

    fn set_state_name(&mut self, _label: Option<String>) {}

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn mark_deleted(&mut self, _now: DateTime<Utc>) {}

    // Newest first.
    fn order(rows: &mut [Self]) {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    }
}

macro_rules! stored_named_entity {
    ($ty:ident, $field:ident, label = $label:expr) => {
        impl StoredEntity for $ty {
            const STATE_LABEL: bool = $label;

            fn table(catalog: &InMemoryCatalog) -> &Mutex<Table<Self>> {
                &catalog.$field
            }

            fn materialize(id: EntityId, draft: &NamedDraft, now: DateTime<Utc>) -> Self {
                Self {
                    id,
                    name: draft.name.clone(),
                    state_id: draft.state_id,
                    state_name: None,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                }
            }

            fn apply(&mut self, patch: &NamedPatch, now: DateTime<Utc>) {
                if let Some(name) = &patch.name {
                    self.name.clone_from(name);
                }
                if let Some(state_id) = patch.state_id {
                    self.state_id = state_id;
                }
                self.updated_at = now;
            }

            fn draft_keys(draft: &NamedDraft) -> ForeignKeys {
                ForeignKeys {
                    state_id: Some(draft.state_id),
                    province_id: None,
                }
            }

            fn patch_keys(patch: &NamedPatch) -> ForeignKeys {
                ForeignKeys {
                    state_id: patch.state_id,
                    province_id: None,
                }
            }

            fn state_id(&self) -> Option<EntityId> {
                Some(self.state_id)
            }

            fn set_state_name(&mut self, label: Option<String>) {
                self.state_name = label;
            }

            fn deleted_at(&self) -> Option<DateTime<Utc>> {
                self.deleted_at
            }

            fn mark_deleted(&mut self, now: DateTime<Utc>) {
                self.deleted_at = Some(now);
            }
        }
    };
}

stored_named_entity!(Role, roles, label = true);
stored_named_entity!(Province, provinces, label = true);
stored_named_entity!(PaymentMethod, payment_methods, label = false);
stored_named_entity!(AppointmentStatus, appointment_statuses, label = true);

impl StoredEntity for Canton {
    const STATE_LABEL: bool = true;

    fn table(catalog: &InMemoryCatalog) -> &Mutex<Table<Self>> {
        &catalog.cantons
    }

    fn materialize(id: EntityId, draft: &CantonDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            province_id: draft.province_id,
            state_id: draft.state_id,
            state_name: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn apply(&mut self, patch: &CantonPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(province_id) = patch.province_id {
            self.province_id = province_id;
        }
        if let Some(state_id) = patch.state_id {
            self.state_id = state_id;
        }
        self.updated_at = now;
    }

    fn draft_keys(draft: &CantonDraft) -> ForeignKeys {
        ForeignKeys {
            state_id: Some(draft.state_id),
            province_id: Some(draft.province_id),
        }
    }

    fn patch_keys(patch: &CantonPatch) -> ForeignKeys {
        ForeignKeys {
            state_id: patch.state_id,
            province_id: patch.province_id,
        }
    }

    fn state_id(&self) -> Option<EntityId> {
        Some(self.state_id)
    }

    fn set_state_name(&mut self, label: Option<String>) {
        self.state_name = label;
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
    }
}
