//! Group record: the root of the definition hierarchy.

use serde::{Deserialize, Serialize};

/// Auto-assigned `Groups.id` value.
pub type GroupId = i64;

/// One named collection of endpoint definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Unique across all groups.
    pub name: String,
}
