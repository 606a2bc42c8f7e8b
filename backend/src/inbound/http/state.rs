//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::CatalogService;
use crate::domain::catalog::{
    AppointmentStatus, Canton, CatalogEntity, Client, PaymentMethod, Province, Role,
};
use crate::domain::ports::{
    CantonProvinceQuery, CantonRepository, CatalogCommand, CatalogQuery, CatalogRepository,
};

/// Read and write ports for one catalog entity.
pub struct CatalogPorts<E> {
    pub query: Arc<dyn CatalogQuery<E>>,
    pub command: Arc<dyn CatalogCommand<E>>,
}

impl<E> Clone for CatalogPorts<E> {
    fn clone(&self) -> Self {
        Self {
            query: Arc::clone(&self.query),
            command: Arc::clone(&self.command),
        }
    }
}

impl<E: CatalogEntity> CatalogPorts<E> {
    /// Use one service object for both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: CatalogQuery<E> + CatalogCommand<E> + 'static,
    {
        Self {
            query: service.clone(),
            command: service,
        }
    }

    /// Wrap a repository in a [`CatalogService`] and expose it as both ports.
    pub fn from_repository(repo: Arc<dyn CatalogRepository<E>>) -> Self {
        Self::from_service(Arc::new(CatalogService::<E, dyn CatalogRepository<E>>::new(repo)))
    }
}

/// Driven repositories for every catalog entity.
///
/// The single wiring point between an outbound adapter and the HTTP state.
#[derive(Clone)]
pub struct CatalogRepositories {
    pub clients: Arc<dyn CatalogRepository<Client>>,
    pub roles: Arc<dyn CatalogRepository<Role>>,
    pub provinces: Arc<dyn CatalogRepository<Province>>,
    pub cantons: Arc<dyn CantonRepository>,
    pub payment_methods: Arc<dyn CatalogRepository<PaymentMethod>>,
    pub appointment_statuses: Arc<dyn CatalogRepository<AppointmentStatus>>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub clients: CatalogPorts<Client>,
    pub roles: CatalogPorts<Role>,
    pub provinces: CatalogPorts<Province>,
    pub cantons: CatalogPorts<Canton>,
    pub cantons_by_province: Arc<dyn CantonProvinceQuery>,
    pub payment_methods: CatalogPorts<PaymentMethod>,
    pub appointment_statuses: CatalogPorts<AppointmentStatus>,
}

impl HttpState {
    /// Build catalog services over the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use refdata::domain::catalog::{
    ///     AppointmentStatus, Canton, Client, PaymentMethod, Province, Role,
    /// };
    /// use refdata::inbound::http::state::{CatalogRepositories, HttpState};
    /// use refdata::outbound::memory::InMemoryCatalog;
    ///
    /// let catalog = Arc::new(InMemoryCatalog::new(Arc::new(DefaultClock)));
    /// let state = HttpState::from_repositories(CatalogRepositories {
    ///     clients: Arc::new(catalog.repository::<Client>()),
    ///     roles: Arc::new(catalog.repository::<Role>()),
    ///     provinces: Arc::new(catalog.repository::<Province>()),
    ///     cantons: Arc::new(catalog.repository::<Canton>()),
    ///     payment_methods: Arc::new(catalog.repository::<PaymentMethod>()),
    ///     appointment_statuses: Arc::new(catalog.repository::<AppointmentStatus>()),
    /// });
    /// let _roles = state.roles.query.clone();
    /// ```
    pub fn from_repositories(repos: CatalogRepositories) -> Self {
        let CatalogRepositories {
            clients,
            roles,
            provinces,
            cantons,
            payment_methods,
            appointment_statuses,
        } = repos;
        let canton_service = Arc::new(CatalogService::<Canton, dyn CantonRepository>::new(cantons));
        Self {
            clients: CatalogPorts::from_repository(clients),
            roles: CatalogPorts::from_repository(roles),
            provinces: CatalogPorts::from_repository(provinces),
            cantons: CatalogPorts::from_service(canton_service.clone()),
            cantons_by_province: canton_service,
            payment_methods: CatalogPorts::from_repository(payment_methods),
            appointment_statuses: CatalogPorts::from_repository(appointment_statuses),
        }
    }
}
