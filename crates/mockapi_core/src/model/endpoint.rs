//! Endpoint definition model.
//!
//! # Responsibility
//! - Carry the canned response metadata for one route + method pair.
//! - Expose the composite key used by headers and lookups.
//!
//! # Invariants
//! - `(path, http_method)` is unique across all groups.
//! - `description` is the only optional field.

use super::group::GroupId;
use super::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Composite `(endpoint, HTTPMethod)` key of one endpoint row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointKey {
    /// Stored in the `endpoint` column.
    #[serde(rename = "endpoint")]
    pub path: String,
    pub http_method: String,
}

impl EndpointKey {
    pub fn new(path: impl Into<String>, http_method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            http_method: http_method.into(),
        }
    }

    /// Rejects blank path or method.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.path.trim().is_empty() {
            return Err(ModelValidationError::EmptyPath);
        }
        if self.http_method.trim().is_empty() {
            return Err(ModelValidationError::EmptyHttpMethod);
        }
        Ok(())
    }
}

impl Display for EndpointKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.http_method, self.path)
    }
}

/// Caller-supplied endpoint fields, used for both create and update.
///
/// Serialized names follow the stored column vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDetails {
    #[serde(rename = "endpoint")]
    pub path: String,
    pub description: Option<String>,
    pub http_method: String,
    /// Free-form content type label, e.g. `json` or `text`.
    pub response_body_type: String,
    pub response_body: String,
}

impl EndpointDetails {
    /// Creates details with no description.
    pub fn new(
        path: impl Into<String>,
        http_method: impl Into<String>,
        response_body_type: impl Into<String>,
        response_body: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            description: None,
            http_method: http_method.into(),
            response_body_type: response_body_type.into(),
            response_body: response_body.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn key(&self) -> EndpointKey {
        EndpointKey::new(self.path.as_str(), self.http_method.as_str())
    }

    /// Checks required fields before persistence.
    ///
    /// The response body itself may be empty (e.g. `204` style mocks).
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        self.key().validate()?;
        if self.response_body_type.trim().is_empty() {
            return Err(ModelValidationError::EmptyResponseBodyType);
        }
        Ok(())
    }
}

/// Stored endpoint row: details plus owning group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub group_id: GroupId,
    #[serde(flatten)]
    pub details: EndpointDetails,
}

impl Endpoint {
    pub fn key(&self) -> EndpointKey {
        self.details.key()
    }
}

#[cfg(test)]
mod tests {
    use super::{EndpointDetails, EndpointKey};
    use crate::model::ModelValidationError;

    #[test]
    fn validate_rejects_blank_key_parts() {
        let details = EndpointDetails::new("  ", "GET", "json", "{}");
        assert_eq!(details.validate(), Err(ModelValidationError::EmptyPath));

        let details = EndpointDetails::new("/users", "", "json", "{}");
        assert_eq!(details.validate(), Err(ModelValidationError::EmptyHttpMethod));
    }

    #[test]
    fn validate_allows_empty_body_but_not_body_type() {
        let details = EndpointDetails::new("/users", "DELETE", "text", "");
        assert!(details.validate().is_ok());

        let details = EndpointDetails::new("/users", "DELETE", "", "");
        assert_eq!(
            details.validate(),
            Err(ModelValidationError::EmptyResponseBodyType)
        );
    }

    #[test]
    fn key_matches_path_and_method() {
        let details = EndpointDetails::new("/users", "POST", "json", "{}");
        assert_eq!(details.key(), EndpointKey::new("/users", "POST"));
        assert_eq!(details.key().to_string(), "POST /users");
    }
}
