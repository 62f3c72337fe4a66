//! Nested read model of the whole store, used for export and inspection.

use crate::model::endpoint::EndpointDetails;
use crate::model::group::GroupId;
use crate::model::header::ResponseHeader;
use serde::{Deserialize, Serialize};

/// One group with every endpoint it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub id: GroupId,
    pub name: String,
    pub endpoints: Vec<EndpointSnapshot>,
}

/// One endpoint with its response headers in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSnapshot {
    #[serde(flatten)]
    pub details: EndpointDetails,
    pub headers: Vec<ResponseHeader>,
}
