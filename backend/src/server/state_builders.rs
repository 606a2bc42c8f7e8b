//! Builders wiring catalog repositories into HTTP and health state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use refdata::domain::catalog::{AppointmentStatus, Canton, Client, PaymentMethod, Province, Role};
use refdata::domain::ports::{ConnectivityProbe, FixtureConnectivityProbe};
use refdata::inbound::http::state::{CatalogRepositories, HttpState};
use refdata::outbound::memory::InMemoryCatalog;
use refdata::outbound::persistence::{
    DbPool, DieselAppointmentStatusRepository, DieselCantonRepository, DieselClientRepository,
    DieselConnectivityProbe, DieselPaymentMethodRepository, DieselProvinceRepository,
    DieselRoleRepository,
};

use super::ServerConfig;

/// Repositories plus the probe that reports on the same store.
pub(crate) struct StorageBundle {
    pub(crate) repositories: CatalogRepositories,
    pub(crate) probe: Arc<dyn ConnectivityProbe>,
}

fn diesel_storage(pool: &DbPool, clock: Arc<dyn Clock>) -> StorageBundle {
    StorageBundle {
        repositories: CatalogRepositories {
            clients: Arc::new(DieselClientRepository::new(pool.clone(), clock.clone())),
            roles: Arc::new(DieselRoleRepository::new(pool.clone(), clock.clone())),
            provinces: Arc::new(DieselProvinceRepository::new(pool.clone(), clock.clone())),
            cantons: Arc::new(DieselCantonRepository::new(pool.clone(), clock.clone())),
            payment_methods: Arc::new(DieselPaymentMethodRepository::new(
                pool.clone(),
                clock.clone(),
            )),
            appointment_statuses: Arc::new(DieselAppointmentStatusRepository::new(
                pool.clone(),
                clock,
            )),
        },
        probe: Arc::new(DieselConnectivityProbe::new(pool.clone())),
    }
}

fn in_memory_storage(clock: Arc<dyn Clock>) -> StorageBundle {
    let catalog = Arc::new(InMemoryCatalog::new(clock));
    StorageBundle {
        repositories: CatalogRepositories {
            clients: Arc::new(catalog.repository::<Client>()),
            roles: Arc::new(catalog.repository::<Role>()),
            provinces: Arc::new(catalog.repository::<Province>()),
            cantons: Arc::new(catalog.repository::<Canton>()),
            payment_methods: Arc::new(catalog.repository::<PaymentMethod>()),
            appointment_statuses: Arc::new(catalog.repository::<AppointmentStatus>()),
        },
        probe: Arc::new(FixtureConnectivityProbe),
    }
}

/// Pick PostgreSQL when a pool is configured, otherwise the in-memory
/// catalog.
pub(crate) fn build_storage(config: &ServerConfig) -> StorageBundle {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => diesel_storage(pool, clock),
        None => {
            info!("no database configured; serving the in-memory catalog");
            in_memory_storage(clock)
        }
    }
}

/// Build HTTP state from the selected storage.
pub(crate) fn build_http_state(repositories: CatalogRepositories) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repositories(repositories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use refdata::domain::ports::CatalogRepository;

    #[tokio::test]
    async fn without_pool_storage_is_in_memory_and_reachable() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));

        let storage = build_storage(&config);

        assert!(storage.probe.ping().await.is_ok());
        let roles = storage
            .repositories
            .roles
            .find_all()
            .await
            .expect("in-memory read");
        assert!(roles.is_empty());
    }
}
