//! In-memory catalog storage.
//!
//! [`InMemoryCatalog`] holds one table per entity plus the seeded
//! `general_status` labels, and hands out [`InMemoryCatalogRepository`]
//! handles implementing the catalog ports with the same observable behaviour
//! as the PostgreSQL adapter: active-row filtering, status labels joined on
//! read, foreign-key checks and clock-driven timestamps. The server falls back
//! to it when no database URL is configured.

mod records;

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::catalog::{
    AppointmentStatus, Canton, Client, DeleteMode, EntityId, EntityPatch, PaymentMethod, Province,
    Role,
};
use crate::domain::ports::{CantonRepository, CatalogRepository, CatalogRepositoryError};

pub use records::{ForeignKeys, StoredEntity};

/// Rows of one in-memory table keyed by id.
#[derive(Debug)]
pub struct Table<E> {
    rows: BTreeMap<EntityId, E>,
    last_id: EntityId,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

/// Shared in-memory database backing every catalog repository.
pub struct InMemoryCatalog {
    statuses: BTreeMap<EntityId, String>,
    clients: Mutex<Table<Client>>,
    roles: Mutex<Table<Role>>,
    provinces: Mutex<Table<Province>>,
    cantons: Mutex<Table<Canton>>,
    payment_methods: Mutex<Table<PaymentMethod>>,
    appointment_statuses: Mutex<Table<AppointmentStatus>>,
    clock: Arc<dyn Clock>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryCatalog {
    /// Build an empty catalog with `general_status` seeded as
    /// `1 = Activo`, `2 = Inactivo`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let statuses = BTreeMap::from([(1, "Activo".to_owned()), (2, "Inactivo".to_owned())]);
        Self {
            statuses,
            clients: Mutex::default(),
            roles: Mutex::default(),
            provinces: Mutex::default(),
            cantons: Mutex::default(),
            payment_methods: Mutex::default(),
            appointment_statuses: Mutex::default(),
            clock,
        }
    }

    /// Repository handle for entity `E` over this catalog.
    #[must_use]
    pub fn repository<E: StoredEntity>(self: &Arc<Self>) -> InMemoryCatalogRepository<E> {
        InMemoryCatalogRepository {
            catalog: Arc::clone(self),
            entity: PhantomData,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    fn with_label<E: StoredEntity>(&self, mut row: E) -> E {
        if E::STATE_LABEL {
            let label = row
                .state_id()
                .and_then(|id| self.statuses.get(&id))
                .cloned();
            row.set_state_name(label);
        }
        row
    }

    fn check_references(&self, keys: ForeignKeys) -> Result<(), CatalogRepositoryError> {
        if let Some(state_id) = keys.state_id {
            if !self.statuses.contains_key(&state_id) {
                return Err(CatalogRepositoryError::invalid_reference(format!(
                    "id_state {state_id} does not exist in general_status"
                )));
            }
        }
        if let Some(province_id) = keys.province_id {
            if !lock(&self.provinces).rows.contains_key(&province_id) {
                return Err(CatalogRepositoryError::invalid_reference(format!(
                    "id_province {province_id} does not exist in provinces"
                )));
            }
        }
        Ok(())
    }

    fn active_rows<E, F>(&self, keep: F) -> Vec<E>
    where
        E: StoredEntity,
        F: Fn(&E) -> bool,
    {
        let table = lock(E::table(self));
        let mut rows: Vec<E> = table
            .rows
            .values()
            .filter(|row| row.deleted_at().is_none() && keep(row))
            .cloned()
            .map(|row| self.with_label(row))
            .collect();
        E::order(&mut rows);
        rows
    }

    fn active_row<E: StoredEntity>(&self, id: EntityId) -> Option<E> {
        let table = lock(E::table(self));
        table
            .rows
            .get(&id)
            .filter(|row| row.deleted_at().is_none())
            .cloned()
            .map(|row| self.with_label(row))
    }

    fn insert<E: StoredEntity>(&self, draft: &E::Draft) -> Result<E, CatalogRepositoryError> {
        self.check_references(E::draft_keys(draft))?;
        let now = self.now();
        let id = {
            let mut table = lock(E::table(self));
            table.last_id += 1;
            let id = table.last_id;
            table.rows.insert(id, E::materialize(id, draft, now));
            id
        };
        self.active_row(id)
            .ok_or_else(|| CatalogRepositoryError::missing_after_write(id))
    }

    fn patch<E: StoredEntity>(
        &self,
        id: EntityId,
        patch: &E::Patch,
    ) -> Result<Option<E>, CatalogRepositoryError> {
        if patch.is_empty() {
            return Ok(self.active_row(id));
        }
        self.check_references(E::patch_keys(patch))?;
        let now = self.now();
        let mut table = lock(E::table(self));
        let Some(row) = table.rows.get_mut(&id).filter(|row| row.deleted_at().is_none()) else {
            return Ok(None);
        };
        row.apply(patch, now);
        let updated = row.clone();
        drop(table);
        Ok(Some(self.with_label(updated)))
    }

    fn remove<E: StoredEntity>(&self, id: EntityId) -> bool {
        let now = self.now();
        let mut table = lock(E::table(self));
        match E::DELETE_MODE {
            DeleteMode::Hard => table.rows.remove(&id).is_some(),
            DeleteMode::Soft => match table.rows.get_mut(&id) {
                Some(row) if row.deleted_at().is_none() => {
                    row.mark_deleted(now);
                    true
                }
                _ => false,
            },
        }
    }
}

/// [`CatalogRepository`] for entity `E` backed by an [`InMemoryCatalog`].
pub struct InMemoryCatalogRepository<E> {
    catalog: Arc<InMemoryCatalog>,
    entity: PhantomData<fn() -> E>,
}

impl<E> Clone for InMemoryCatalogRepository<E> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: StoredEntity> CatalogRepository<E> for InMemoryCatalogRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, CatalogRepositoryError> {
        Ok(self.catalog.active_rows(|_: &E| true))
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, CatalogRepositoryError> {
        Ok(self.catalog.active_row(id))
    }

    async fn find_by_unique(&self, value: &str) -> Result<Option<E>, CatalogRepositoryError> {
        let wanted = value.to_lowercase();
        Ok(self
            .catalog
            .active_rows(|row: &E| row.unique_value().to_lowercase() == wanted)
            .into_iter()
            .next())
    }

    async fn create(&self, draft: &E::Draft) -> Result<E, CatalogRepositoryError> {
        self.catalog.insert(draft)
    }

    async fn update(
        &self,
        id: EntityId,
        patch: &E::Patch,
    ) -> Result<Option<E>, CatalogRepositoryError> {
        self.catalog.patch(id, patch)
    }

    async fn delete(&self, id: EntityId) -> Result<bool, CatalogRepositoryError> {
        Ok(self.catalog.remove::<E>(id))
    }
}

#[async_trait]
impl CantonRepository for InMemoryCatalogRepository<Canton> {
    async fn find_by_province(
        &self,
        province_id: EntityId,
    ) -> Result<Vec<Canton>, CatalogRepositoryError> {
        Ok(self
            .catalog
            .active_rows(|canton: &Canton| canton.province_id == province_id))
    }
}
