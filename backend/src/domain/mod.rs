//! Domain primitives, ports and services.
//!
//! Public surface:
//! - `catalog`: the six reference-data entities and their shared contract.
//! - `ports`: driven (repository, probe) and driving (query, command) ports.
//! - [`CatalogService`]: the uniqueness-checked service behind every entity.
//! - [`Error`]/[`ErrorCode`]: transport-agnostic failure payload.
//! - [`TraceId`]: request correlation identifier.

pub mod catalog;
mod catalog_service;
pub mod error;
pub mod ports;
mod trace_id;

pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use refdata::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("missing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
