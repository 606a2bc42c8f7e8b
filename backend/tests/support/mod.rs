//! Shared helpers for the Diesel integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each suite pulls these in with `mod support;`.

#![allow(dead_code)]

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{EmbeddedCatalog, embedded_catalog};
