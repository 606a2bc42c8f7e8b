//! Shared Diesel error mapping for the catalog repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::CatalogRepositoryError;

use super::pool::PoolError;

/// Map pool checkout failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> CatalogRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CatalogRepositoryError::connection(message)
        }
    }
}

/// Map Diesel failures for `operation` on `table` to repository errors.
///
/// Closed connections become [`CatalogRepositoryError::Connection`], foreign
/// key violations become [`CatalogRepositoryError::InvalidReference`] and
/// everything else is a query failure.
pub(crate) fn map_diesel_error(
    table: &'static str,
    operation: &'static str,
    error: DieselError,
) -> CatalogRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(table, operation, ?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(table, operation, %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CatalogRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            let constraint = info.constraint_name().unwrap_or(table).to_owned();
            CatalogRepositoryError::invalid_reference(constraint)
        }
        DieselError::NotFound => CatalogRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => CatalogRepositoryError::query("database query error"),
        _ => CatalogRepositoryError::query(format!("{operation} on {table} failed")),
    }
}
