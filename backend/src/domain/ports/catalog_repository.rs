//! Driven ports for catalog persistence.
//!
//! One generic [`CatalogRepository`] covers every catalog table. Adapters
//! decide how "active" is expressed (a `deleted_at IS NULL` filter for soft
//! deleted tables, every row for hard deleted ones) and stamp timestamps
//! themselves. No method retries; storage faults surface unchanged as
//! [`CatalogRepositoryError`].

use async_trait::async_trait;

use crate::domain::catalog::{Canton, CatalogEntity, EntityId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalog repository adapters.
    pub enum CatalogRepositoryError {
        /// A pooled connection could not be obtained or was lost.
        Connection { message: String } =>
            "catalog repository connection failed: {message}",
        /// Statement execution failed.
        Query { message: String } =>
            "catalog repository query failed: {message}",
        /// A foreign key pointed at a row that does not exist.
        InvalidReference { message: String } =>
            "catalog repository rejected a dangling reference: {message}",
        /// The row written a moment ago could not be read back.
        MissingAfterWrite { id: EntityId } =>
            "row {id} was not found after it was written",
    }
}

/// Persistence contract for one catalog entity.
#[async_trait]
pub trait CatalogRepository<E: CatalogEntity>: Send + Sync {
    /// All active rows, in the table's natural order.
    async fn find_all(&self) -> Result<Vec<E>, CatalogRepositoryError>;

    /// The active row with `id`, if any.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, CatalogRepositoryError>;

    /// The active row whose unique field equals `value`, if any.
    async fn find_by_unique(&self, value: &str) -> Result<Option<E>, CatalogRepositoryError>;

    /// Insert a row and return it as read back from storage.
    ///
    /// Fails with [`CatalogRepositoryError::MissingAfterWrite`] when the
    /// read-back finds nothing.
    async fn create(&self, draft: &E::Draft) -> Result<E, CatalogRepositoryError>;

    /// Apply the fields present in `patch` to the active row `id`.
    ///
    /// An empty patch performs no write and returns the current row. A
    /// non-empty patch also stamps `updated_at`. Returns `None` when no active
    /// row remains after the write.
    async fn update(
        &self,
        id: EntityId,
        patch: &E::Patch,
    ) -> Result<Option<E>, CatalogRepositoryError>;

    /// Soft or hard delete, reporting whether a row was affected.
    async fn delete(&self, id: EntityId) -> Result<bool, CatalogRepositoryError>;
}

/// Canton persistence with the extra parent lookup.
#[async_trait]
pub trait CantonRepository: CatalogRepository<Canton> {
    /// Active cantons belonging to `province_id`.
    async fn find_by_province(
        &self,
        province_id: EntityId,
    ) -> Result<Vec<Canton>, CatalogRepositoryError>;
}
