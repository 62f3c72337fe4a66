//! Domain model for mock-API definitions.
//!
//! # Responsibility
//! - Define the records stored per group, endpoint and response header.
//! - Validate caller-supplied fields before any SQL runs.
//!
//! # Invariants
//! - An endpoint is identified by `(path, http_method)`, never by group.
//! - Field values round-trip through storage unchanged (no normalization).

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod endpoint;
pub mod group;
pub mod header;

/// Validation failures for caller-supplied model values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelValidationError {
    EmptyGroupName,
    EmptyPath,
    EmptyHttpMethod,
    EmptyResponseBodyType,
    EmptyHeaderKey,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::EmptyGroupName => "group name must not be blank",
            Self::EmptyPath => "endpoint path must not be blank",
            Self::EmptyHttpMethod => "http method must not be blank",
            Self::EmptyResponseBodyType => "response body type must not be blank",
            Self::EmptyHeaderKey => "response header key must not be blank",
        };
        f.write_str(message)
    }
}

impl Error for ModelValidationError {}

/// Rejects blank group names.
pub fn validate_group_name(name: &str) -> Result<(), ModelValidationError> {
    if name.trim().is_empty() {
        return Err(ModelValidationError::EmptyGroupName);
    }
    Ok(())
}
