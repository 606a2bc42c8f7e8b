//! Embedded PostgreSQL scratch databases for adapter tests.
//!
//! Every context gets its own temporary database on the shared cluster,
//! migrated with the same embedded migrations the service applies at
//! startup.

use std::sync::Arc;
use std::time::Duration;

use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle, TemporaryDatabase};
use refdata::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use refdata::test_support::{MutableClock, fixture_timestamp};
use tokio::runtime::Runtime;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A migrated temporary database plus what adapters need to talk to it.
pub struct EmbeddedCatalog {
    /// Tokio runtime reused for all async operations in one test.
    pub runtime: Runtime,
    pub pool: DbPool,
    pub clock: Arc<MutableClock>,
    pub database_url: String,
    _database: TemporaryDatabase,
}

/// Shared cluster handle, retried while another test binary is still
/// bootstrapping.
pub fn shared_cluster() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= SHARED_CLUSTER_RETRIES {
                    return Err(error);
                }
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Pin `PG_PASSWORD` so a reused data directory keeps accepting logins.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "refdata_embedded_test");
        }
    }
}

/// Create and migrate a temporary database and open a small pool on it.
pub fn embedded_catalog() -> Result<EmbeddedCatalog, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster().map_err(|err| format!("{err:?}"))?;
    let database_name = format!("refdata_test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(database_name.as_str())
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    let database_url = database.url().to_string();

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime.block_on(async {
        run_pending_migrations(&database_url)
            .await
            .map_err(|err| err.to_string())?;
        DbPool::new(config).await.map_err(|err| err.to_string())
    })?;

    Ok(EmbeddedCatalog {
        runtime,
        pool,
        clock: Arc::new(MutableClock::new(fixture_timestamp())),
        database_url,
        _database: database,
    })
}
