//! Catalog domain service.
//!
//! [`CatalogService`] implements the catalog driving ports for every entity
//! type. It enforces existence and uniqueness around a
//! [`CatalogRepository`] and turns repository outcomes into the closed
//! [`CatalogError`] taxonomy. Storage faults are never swallowed.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::domain::catalog::{
    Canton, CatalogEntity, CatalogError, DeleteMode, EntityDraft, EntityId, EntityPatch,
};
use crate::domain::ports::{
    CantonProvinceQuery, CantonRepository, CatalogCommand, CatalogQuery, CatalogRepository,
    CatalogRepositoryError,
};

/// Uniqueness-checked service for the catalog entity `E`.
pub struct CatalogService<E, R: ?Sized> {
    repo: Arc<R>,
    entity: PhantomData<fn() -> E>,
}

impl<E, R: ?Sized> CatalogService<E, R> {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            entity: PhantomData,
        }
    }
}

impl<E, R: ?Sized> Clone for CatalogService<E, R> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.repo))
    }
}

impl<E, R> CatalogService<E, R>
where
    E: CatalogEntity,
    R: CatalogRepository<E> + ?Sized,
{
    fn map_repository_error(err: CatalogRepositoryError) -> CatalogError {
        match err {
            CatalogRepositoryError::InvalidReference { message } => {
                debug!(entity = %E::KIND, %message, "storage rejected a dangling reference");
                CatalogError::invalid_argument(E::KIND, message)
            }
            other => {
                error!(entity = %E::KIND, error = %other, "catalog storage failure");
                CatalogError::internal(E::KIND, other.to_string())
            }
        }
    }

    async fn require(&self, id: EntityId) -> Result<E, CatalogError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| CatalogError::not_found(E::KIND, id))
    }

    /// Reject `value` when an active row other than `except` holds it.
    async fn ensure_unique(&self, value: &str, except: Option<EntityId>) -> Result<(), CatalogError> {
        let holder = self
            .repo
            .find_by_unique(value)
            .await
            .map_err(Self::map_repository_error)?;
        match holder {
            Some(existing) if Some(existing.id()) != except => {
                warn!(
                    entity = %E::KIND,
                    field = E::KIND.unique_field(),
                    value,
                    holder = existing.id(),
                    "rejecting duplicate unique value"
                );
                Err(CatalogError::duplicate(E::KIND, value))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<E, R> CatalogQuery<E> for CatalogService<E, R>
where
    E: CatalogEntity,
    R: CatalogRepository<E> + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<E>, CatalogError> {
        self.repo
            .find_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<E, CatalogError> {
        self.require(id).await
    }
}

#[async_trait]
impl<E, R> CatalogCommand<E> for CatalogService<E, R>
where
    E: CatalogEntity,
    R: CatalogRepository<E> + ?Sized,
{
    async fn create(&self, draft: E::Draft) -> Result<E, CatalogError> {
        self.ensure_unique(draft.unique_value(), None).await?;
        let created = self
            .repo
            .create(&draft)
            .await
            .map_err(Self::map_repository_error)?;
        debug!(entity = %E::KIND, id = created.id(), "created catalog entity");
        Ok(created)
    }

    async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E, CatalogError> {
        let current = self.require(id).await?;
        match patch.unique_value() {
            Some(value) if value != current.unique_value() => {
                self.ensure_unique(value, Some(id)).await?;
            }
            _ => {}
        }

        let updated = self
            .repo
            .update(id, &patch)
            .await
            .map_err(Self::map_repository_error)?;
        match updated {
            Some(entity) => {
                debug!(entity = %E::KIND, id, empty = patch.is_empty(), "updated catalog entity");
                Ok(entity)
            }
            None => {
                warn!(entity = %E::KIND, id, "row vanished between existence check and update");
                Err(CatalogError::internal(
                    E::KIND,
                    format!("{} {id} disappeared during update", E::KIND),
                ))
            }
        }
    }

    async fn delete(&self, id: EntityId) -> Result<(), CatalogError> {
        self.require(id).await?;
        let affected = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if affected {
            debug!(entity = %E::KIND, id, "deleted catalog entity");
            return Ok(());
        }

        match E::DELETE_MODE {
            DeleteMode::Hard => {
                warn!(entity = %E::KIND, id, "hard delete affected no rows");
                Err(CatalogError::internal(
                    E::KIND,
                    format!("{} {id} could not be deleted", E::KIND),
                ))
            }
            DeleteMode::Soft => {
                warn!(entity = %E::KIND, id, "soft delete affected no rows; row already gone");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl<R> CantonProvinceQuery for CatalogService<Canton, R>
where
    R: CantonRepository + ?Sized,
{
    async fn get_by_province(&self, province_id: EntityId) -> Result<Vec<Canton>, CatalogError> {
        self.repo
            .find_by_province(province_id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
