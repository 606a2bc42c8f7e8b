//! PostgreSQL repositories for the name-keyed, soft-deleted catalog tables.
//!
//! Roles, provinces, payment methods and appointment statuses share one
//! column layout, so one macro generates their adapters. Every read inner
//! joins `general_status`; payment methods discard the joined label.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use mockable::Clock;

use crate::domain::catalog::{
    AppointmentStatus, EntityId, EntityPatch, NamedDraft, NamedPatch, PaymentMethod, Province,
    Role,
};
use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};

use super::lower;
use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    AppointmentStatusChangeset, AppointmentStatusRow, NewAppointmentStatusRow,
    NewPaymentMethodRow, NewProvinceRow, NewRoleRow, PaymentMethodChangeset, PaymentMethodRow,
    ProvinceChangeset, ProvinceRow, RoleChangeset, RoleRow,
};
use super::pool::DbPool;
use super::schema::{appointment_status, general_status, payment_methods, provinces, roles};

macro_rules! diesel_named_repository {
    (
        $(#[$meta:meta])*
        $repo:ident for $entity:ident {
            table: $table:ident,
            row: $row:ident,
            new_row: $new_row:ident,
            changeset: $changeset:ident,
            state_label: $label:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $repo {
            pool: DbPool,
            clock: Arc<dyn Clock>,
        }

        impl $repo {
            /// Create a repository over `pool`, stamping writes with `clock`.
            pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
                Self { pool, clock }
            }

            fn to_entity((row, label): ($row, String)) -> $entity {
                $entity {
                    id: row.id,
                    name: row.name,
                    state_id: row.id_state,
                    state_name: $label.then_some(label),
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                    deleted_at: row.deleted_at,
                }
            }

            async fn load_active(
                conn: &mut AsyncPgConnection,
                id: EntityId,
            ) -> Result<Option<$entity>, CatalogRepositoryError> {
                $table::table
                    .inner_join(general_status::table)
                    .filter($table::id.eq(id))
                    .filter($table::deleted_at.is_null())
                    .select(($row::as_select(), general_status::name))
                    .first::<($row, String)>(conn)
                    .await
                    .optional()
                    .map(|found| found.map(Self::to_entity))
                    .map_err(|err| map_diesel_error(stringify!($table), "find_by_id", err))
            }
        }

        #[async_trait]
        impl CatalogRepository<$entity> for $repo {
            async fn find_all(&self) -> Result<Vec<$entity>, CatalogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<($row, String)> = $table::table
                    .inner_join(general_status::table)
                    .filter($table::deleted_at.is_null())
                    .order($table::id.asc())
                    .select(($row::as_select(), general_status::name))
                    .load(&mut conn)
                    .await
                    .map_err(|err| map_diesel_error(stringify!($table), "find_all", err))?;
                Ok(rows.into_iter().map(Self::to_entity).collect())
            }

            async fn find_by_id(
                &self,
                id: EntityId,
            ) -> Result<Option<$entity>, CatalogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                Self::load_active(&mut conn, id).await
            }

            async fn find_by_unique(
                &self,
                value: &str,
            ) -> Result<Option<$entity>, CatalogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                $table::table
                    .inner_join(general_status::table)
                    .filter(lower($table::name).eq(lower(value)))
                    .filter($table::deleted_at.is_null())
                    .select(($row::as_select(), general_status::name))
                    .first::<($row, String)>(&mut conn)
                    .await
                    .optional()
                    .map(|found| found.map(Self::to_entity))
                    .map_err(|err| map_diesel_error(stringify!($table), "find_by_name", err))
            }

            async fn create(&self, draft: &NamedDraft) -> Result<$entity, CatalogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let now = self.clock.utc();
                let new_row = $new_row {
                    name: &draft.name,
                    id_state: draft.state_id,
                    created_at: now,
                    updated_at: now,
                };
                let id: EntityId = diesel::insert_into($table::table)
                    .values(&new_row)
                    .returning($table::id)
                    .get_result(&mut conn)
                    .await
                    .map_err(|err| map_diesel_error(stringify!($table), "create", err))?;
                Self::load_active(&mut conn, id)
                    .await?
                    .ok_or_else(|| CatalogRepositoryError::missing_after_write(id))
            }

            async fn update(
                &self,
                id: EntityId,
                patch: &NamedPatch,
            ) -> Result<Option<$entity>, CatalogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                if patch.is_empty() {
                    return Self::load_active(&mut conn, id).await;
                }
                let changes = $changeset {
                    name: patch.name.as_deref(),
                    id_state: patch.state_id,
                    updated_at: self.clock.utc(),
                };
                let affected = diesel::update(
                    $table::table
                        .filter($table::id.eq(id))
                        .filter($table::deleted_at.is_null()),
                )
                .set(&changes)
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(stringify!($table), "update", err))?;
                if affected == 0 {
                    return Ok(None);
                }
                Self::load_active(&mut conn, id).await
            }

            async fn delete(&self, id: EntityId) -> Result<bool, CatalogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let affected = diesel::update(
                    $table::table
                        .filter($table::id.eq(id))
                        .filter($table::deleted_at.is_null()),
                )
                .set($table::deleted_at.eq(Some(self.clock.utc())))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(stringify!($table), "delete", err))?;
                Ok(affected > 0)
            }
        }
    };
}

diesel_named_repository! {
    /// Diesel-backed role repository.
    DieselRoleRepository for Role {
        table: roles,
        row: RoleRow,
        new_row: NewRoleRow,
        changeset: RoleChangeset,
        state_label: true,
    }
}

diesel_named_repository! {
    /// Diesel-backed province repository.
    DieselProvinceRepository for Province {
        table: provinces,
        row: ProvinceRow,
        new_row: NewProvinceRow,
        changeset: ProvinceChangeset,
        state_label: true,
    }
}

diesel_named_repository! {
    /// Diesel-backed payment method repository. Reads omit `state_name`.
    DieselPaymentMethodRepository for PaymentMethod {
        table: payment_methods,
        row: PaymentMethodRow,
        new_row: NewPaymentMethodRow,
        changeset: PaymentMethodChangeset,
        state_label: false,
    }
}

diesel_named_repository! {
    /// Diesel-backed appointment status repository.
    DieselAppointmentStatusRepository for AppointmentStatus {
        table: appointment_status,
        row: AppointmentStatusRow,
        new_row: NewAppointmentStatusRow,
        changeset: AppointmentStatusChangeset,
        state_label: true,
    }
}
