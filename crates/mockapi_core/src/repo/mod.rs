//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one data access contract per table.
//! - Isolate SQLite query details from the store facade.
//!
//! # Invariants
//! - Repository writes validate model values before persistence.
//! - Zero affected rows on update/delete is reported as `NotFound`.

pub mod endpoint_repo;
pub mod group_repo;
pub mod header_repo;
