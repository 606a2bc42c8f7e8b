//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod catalog_command;
mod catalog_query;
mod catalog_repository;
mod connectivity_probe;

pub use catalog_command::CatalogCommand;
pub use catalog_query::{CantonProvinceQuery, CatalogQuery};
pub use catalog_repository::{CantonRepository, CatalogRepository, CatalogRepositoryError};
#[cfg(test)]
pub use connectivity_probe::MockConnectivityProbe;
pub use connectivity_probe::{ConnectivityProbe, ConnectivityProbeError, FixtureConnectivityProbe};
