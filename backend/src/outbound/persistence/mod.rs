//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the catalog repository ports backed by
//! PostgreSQL via `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories translate between row structs and domain
//!   entities; existence and uniqueness rules live in the domain service.
//! - **Internal models**: `models.rs` and `schema.rs` never leave this module.
//! - **Writer-stamped timestamps**: every write takes its time from an
//!   injected `mockable::Clock`.
//! - **Strongly typed errors**: Diesel and pool failures map to
//!   `CatalogRepositoryError`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mockable::DefaultClock;
//! use refdata::outbound::persistence::{DbPool, DieselRoleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/refdata")).await?;
//! let roles = DieselRoleRepository::new(pool, Arc::new(DefaultClock));
//! ```

mod diesel_basic_error_mapping;
mod diesel_canton_repository;
mod diesel_client_repository;
mod diesel_connectivity_probe;
mod diesel_named_repositories;
mod migrations;
mod models;
mod pool;
mod schema;

use diesel::define_sql_function;
use diesel::sql_types::Text;

define_sql_function! {
    /// PostgreSQL `lower(text)`, used to compare unique fields without case.
    fn lower(value: Text) -> Text;
}

pub use diesel_canton_repository::DieselCantonRepository;
pub use diesel_client_repository::DieselClientRepository;
pub use diesel_connectivity_probe::DieselConnectivityProbe;
pub use diesel_named_repositories::{
    DieselAppointmentStatusRepository, DieselPaymentMethodRepository, DieselProvinceRepository,
    DieselRoleRepository,
};
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
