//! Reference-data catalog service library.
//!
//! Hexagonal layout: [`domain`] holds entities, ports and the catalog
//! service; [`outbound`] adapts storage; [`inbound`] exposes HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
