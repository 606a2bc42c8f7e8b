//! Driving ports for catalog reads.
//!
//! Inbound adapters use these ports to list and fetch catalog entities without
//! importing persistence concerns.

use async_trait::async_trait;

use crate::domain::catalog::{Canton, CatalogEntity, CatalogError, EntityId};

/// Read use cases shared by every catalog entity.
#[async_trait]
pub trait CatalogQuery<E: CatalogEntity>: Send + Sync {
    /// Every active entity.
    async fn get_all(&self) -> Result<Vec<E>, CatalogError>;

    /// One active entity; [`CatalogError::NotFound`] when absent.
    async fn get_by_id(&self, id: EntityId) -> Result<E, CatalogError>;
}

/// Cantons filtered by their parent province.
#[async_trait]
pub trait CantonProvinceQuery: Send + Sync {
    /// Active cantons of `province_id`. The province itself is not checked.
    async fn get_by_province(&self, province_id: EntityId) -> Result<Vec<Canton>, CatalogError>;
}
