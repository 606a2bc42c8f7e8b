//! PostgreSQL-backed client repository.
//!
//! Clients are hard deleted and carry no status reference, so reads need no
//! join. Listings are newest first.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use mockable::Clock;

use crate::domain::catalog::{Client, ClientDraft, ClientPatch, EntityId, EntityPatch};
use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};

use super::lower;
use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ClientChangeset, ClientRow, NewClientRow};
use super::pool::DbPool;
use super::schema::clientes;

const TABLE: &str = "clientes";

/// Diesel-backed client repository.
#[derive(Clone)]
pub struct DieselClientRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselClientRepository {
    /// Create a repository over `pool`, stamping writes with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn row_to_client(row: ClientRow) -> Client {
    Client {
        id: row.id,
        name: row.nombre,
        email: row.email,
        phone: row.telefono,
        address: row.direccion,
        created_at: row.fecha_creacion,
        updated_at: row.fecha_actualizacion,
    }
}

async fn load(
    conn: &mut AsyncPgConnection,
    id: EntityId,
) -> Result<Option<Client>, CatalogRepositoryError> {
    clientes::table
        .filter(clientes::id.eq(id))
        .select(ClientRow::as_select())
        .first::<ClientRow>(conn)
        .await
        .optional()
        .map(|found| found.map(row_to_client))
        .map_err(|err| map_diesel_error(TABLE, "find_by_id", err))
}

#[async_trait]
impl CatalogRepository<Client> for DieselClientRepository {
    async fn find_all(&self) -> Result<Vec<Client>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ClientRow> = clientes::table
            .order((clientes::fecha_creacion.desc(), clientes::id.desc()))
            .select(ClientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(TABLE, "find_all", err))?;
        Ok(rows.into_iter().map(row_to_client).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Client>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load(&mut conn, id).await
    }

    async fn find_by_unique(&self, value: &str) -> Result<Option<Client>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        clientes::table
            .filter(lower(clientes::email).eq(lower(value)))
            .select(ClientRow::as_select())
            .first::<ClientRow>(&mut conn)
            .await
            .optional()
            .map(|found| found.map(row_to_client))
            .map_err(|err| map_diesel_error(TABLE, "find_by_email", err))
    }

    async fn create(&self, draft: &ClientDraft) -> Result<Client, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = self.clock.utc();
        let new_row = NewClientRow {
            nombre: &draft.name,
            email: &draft.email,
            telefono: &draft.phone,
            direccion: draft.address.as_deref(),
            fecha_creacion: now,
            fecha_actualizacion: now,
        };
        let id: EntityId = diesel::insert_into(clientes::table)
            .values(&new_row)
            .returning(clientes::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(TABLE, "create", err))?;
        load(&mut conn, id)
            .await?
            .ok_or_else(|| CatalogRepositoryError::missing_after_write(id))
    }

    async fn update(
        &self,
        id: EntityId,
        patch: &ClientPatch,
    ) -> Result<Option<Client>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if patch.is_empty() {
            return load(&mut conn, id).await;
        }
        let changes = ClientChangeset {
            nombre: patch.name.as_deref(),
            email: patch.email.as_deref(),
            telefono: patch.phone.as_deref(),
            direccion: patch.address.as_ref().map(Option::as_deref),
            fecha_actualizacion: self.clock.utc(),
        };
        let affected = diesel::update(clientes::table.filter(clientes::id.eq(id)))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(TABLE, "update", err))?;
        if affected == 0 {
            return Ok(None);
        }
        load(&mut conn, id).await
    }

    async fn delete(&self, id: EntityId) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(clientes::table.filter(clientes::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(TABLE, "delete", err))?;
        Ok(affected > 0)
    }
}
