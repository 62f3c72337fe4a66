//! Persistence layer for mock-API definitions.
//!
//! Stores named groups of endpoints, each endpoint's canned response, and
//! per-endpoint response headers in SQLite, with cascading deletes from
//! group to endpoint to header.

pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use error::{MissingRow, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::endpoint::{Endpoint, EndpointDetails, EndpointKey};
pub use model::group::{Group, GroupId};
pub use model::header::ResponseHeader;
pub use model::ModelValidationError;
pub use store::{EndpointSnapshot, EndpointStore, GroupSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
