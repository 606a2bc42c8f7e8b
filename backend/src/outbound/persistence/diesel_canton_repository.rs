//! PostgreSQL-backed canton repository.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use mockable::Clock;

use crate::domain::catalog::{Canton, CantonDraft, CantonPatch, EntityId, EntityPatch};
use crate::domain::ports::{CantonRepository, CatalogRepository, CatalogRepositoryError};

use super::lower;
use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CantonChangeset, CantonRow, NewCantonRow};
use super::pool::DbPool;
use super::schema::{cantons, general_status};

const TABLE: &str = "cantons";

/// Diesel-backed implementation of [`CantonRepository`].
///
/// `id_province` is enforced by a foreign key; province deletion does not
/// cascade.
#[derive(Clone)]
pub struct DieselCantonRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselCantonRepository {
    /// Create a repository over `pool`, stamping writes with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn row_to_canton((row, label): (CantonRow, String)) -> Canton {
    Canton {
        id: row.id,
        name: row.name,
        province_id: row.id_province,
        state_id: row.id_state,
        state_name: Some(label),
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    }
}

async fn load_active(
    conn: &mut AsyncPgConnection,
    id: EntityId,
) -> Result<Option<Canton>, CatalogRepositoryError> {
    cantons::table
        .inner_join(general_status::table)
        .filter(cantons::id.eq(id))
        .filter(cantons::deleted_at.is_null())
        .select((CantonRow::as_select(), general_status::name))
        .first::<(CantonRow, String)>(conn)
        .await
        .optional()
        .map(|found| found.map(row_to_canton))
        .map_err(|err| map_diesel_error(TABLE, "find_by_id", err))
}

#[async_trait]
impl CatalogRepository<Canton> for DieselCantonRepository {
    async fn find_all(&self) -> Result<Vec<Canton>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CantonRow, String)> = cantons::table
            .inner_join(general_status::table)
            .filter(cantons::deleted_at.is_null())
            .order(cantons::id.asc())
            .select((CantonRow::as_select(), general_status::name))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(TABLE, "find_all", err))?;
        Ok(rows.into_iter().map(row_to_canton).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Canton>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_active(&mut conn, id).await
    }

    async fn find_by_unique(&self, value: &str) -> Result<Option<Canton>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        cantons::table
            .inner_join(general_status::table)
            .filter(lower(cantons::name).eq(lower(value)))
            .filter(cantons::deleted_at.is_null())
            .select((CantonRow::as_select(), general_status::name))
            .first::<(CantonRow, String)>(&mut conn)
            .await
            .optional()
            .map(|found| found.map(row_to_canton))
            .map_err(|err| map_diesel_error(TABLE, "find_by_name", err))
    }

    async fn create(&self, draft: &CantonDraft) -> Result<Canton, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = self.clock.utc();
        let new_row = NewCantonRow {
            name: &draft.name,
            id_province: draft.province_id,
            id_state: draft.state_id,
            created_at: now,
            updated_at: now,
        };
        let id: EntityId = diesel::insert_into(cantons::table)
            .values(&new_row)
            .returning(cantons::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(TABLE, "create", err))?;
        load_active(&mut conn, id)
            .await?
            .ok_or_else(|| CatalogRepositoryError::missing_after_write(id))
    }

    async fn update(
        &self,
        id: EntityId,
        patch: &CantonPatch,
    ) -> Result<Option<Canton>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if patch.is_empty() {
            return load_active(&mut conn, id).await;
        }
        let changes = CantonChangeset {
            name: patch.name.as_deref(),
            id_province: patch.province_id,
            id_state: patch.state_id,
            updated_at: self.clock.utc(),
        };
        let affected = diesel::update(
            cantons::table
                .filter(cantons::id.eq(id))
                .filter(cantons::deleted_at.is_null()),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(TABLE, "update", err))?;
        if affected == 0 {
            return Ok(None);
        }
        load_active(&mut conn, id).await
    }

    async fn delete(&self, id: EntityId) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(
            cantons::table
                .filter(cantons::id.eq(id))
                .filter(cantons::deleted_at.is_null()),
        )
        .set(cantons::deleted_at.eq(Some(self.clock.utc())))
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(TABLE, "delete", err))?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl CantonRepository for DieselCantonRepository {
    async fn find_by_province(
        &self,
        province_id: EntityId,
    ) -> Result<Vec<Canton>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CantonRow, String)> = cantons::table
            .inner_join(general_status::table)
            .filter(cantons::id_province.eq(province_id))
            .filter(cantons::deleted_at.is_null())
            .order(cantons::id.asc())
            .select((CantonRow::as_select(), general_status::name))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(TABLE, "find_by_province", err))?;
        Ok(rows.into_iter().map(row_to_canton).collect())
    }
}
