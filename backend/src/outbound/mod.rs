//! Outbound adapters implementing the catalog repository ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: process-local tables used when no database is configured.
//!
//! Adapters translate between storage representations and domain entities.
//! They contain no business rules.

pub mod memory;
pub mod persistence;
