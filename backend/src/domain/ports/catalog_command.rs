//! Driving port for catalog mutations.

use async_trait::async_trait;

use crate::domain::catalog::{CatalogEntity, CatalogError, EntityId};

/// Write use cases shared by every catalog entity.
///
/// Implementations enforce existence and uniqueness before delegating to
/// storage. Checks and writes are separate round trips, so two concurrent
/// creates with the same unique value can both succeed.
#[async_trait]
pub trait CatalogCommand<E: CatalogEntity>: Send + Sync {
    /// Create an entity, rejecting a unique value already held by an active row.
    async fn create(&self, draft: E::Draft) -> Result<E, CatalogError>;

    /// Apply a partial update to an existing entity.
    async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E, CatalogError>;

    /// Delete an existing entity.
    async fn delete(&self, id: EntityId) -> Result<(), CatalogError>;
}
