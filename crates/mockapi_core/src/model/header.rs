//! Response header model.

use super::ModelValidationError;
use serde::{Deserialize, Serialize};

/// One header key/value attached to an endpoint's canned response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub key: String,
    pub value: String,
}

impl ResponseHeader {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.key.trim().is_empty() {
            return Err(ModelValidationError::EmptyHeaderKey);
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for ResponseHeader {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
