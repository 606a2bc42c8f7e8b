//! HTTP inbound adapter exposing the catalog REST endpoints.

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod health;
pub mod payloads;
pub mod schemas;
pub mod state;
mod validation;

pub use error::ApiResult;
