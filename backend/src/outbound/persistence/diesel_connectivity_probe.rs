//! Readiness probe issuing `SELECT 1` through the pool.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ConnectivityProbe, ConnectivityProbeError};

use super::pool::DbPool;

/// [`ConnectivityProbe`] backed by the PostgreSQL pool.
#[derive(Clone)]
pub struct DieselConnectivityProbe {
    pool: DbPool,
}

impl DieselConnectivityProbe {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectivityProbe for DieselConnectivityProbe {
    async fn ping(&self) -> Result<(), ConnectivityProbeError> {
        let mut conn = self.pool.get().await.map_err(|err| {
            debug!(error = %err, "readiness probe could not check out a connection");
            ConnectivityProbeError::unreachable(err.to_string())
        })?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                debug!(error = %err, "readiness probe query failed");
                ConnectivityProbeError::unreachable(err.to_string())
            })
    }
}
