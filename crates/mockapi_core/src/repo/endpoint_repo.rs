//! Endpoint repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `EndpointDetails` keyed by `(endpoint, HTTPMethod)`.
//! - Keep SQL column naming inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate `EndpointDetails` before SQL mutations.
//! - Rewriting the key relies on `ON UPDATE CASCADE` to move headers.

use crate::error::{MissingRow, StoreError, StoreResult};
use crate::model::endpoint::{Endpoint, EndpointDetails, EndpointKey};
use crate::model::group::GroupId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENDPOINT_SELECT_SQL: &str = "SELECT
    groupId,
    endpoint,
    description,
    HTTPMethod,
    responseBodyType,
    responseBody
FROM EndpointDetails";

/// Repository interface for endpoint operations.
pub trait EndpointRepository {
    fn create_endpoint(&self, group_id: GroupId, details: &EndpointDetails) -> StoreResult<()>;
    /// Overwrites every field of the row at `key`, including the key itself.
    fn update_endpoint(&self, key: &EndpointKey, details: &EndpointDetails) -> StoreResult<()>;
    fn delete_endpoint(&self, group_id: GroupId, key: &EndpointKey) -> StoreResult<()>;
    fn get_endpoint(&self, key: &EndpointKey) -> StoreResult<Option<Endpoint>>;
    fn list_endpoints(&self, group_id: GroupId) -> StoreResult<Vec<Endpoint>>;
}

/// SQLite-backed endpoint repository.
pub struct SqliteEndpointRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEndpointRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EndpointRepository for SqliteEndpointRepository<'_> {
    fn create_endpoint(&self, group_id: GroupId, details: &EndpointDetails) -> StoreResult<()> {
        details.validate()?;

        self.conn.execute(
            "INSERT INTO EndpointDetails (
                endpoint,
                description,
                HTTPMethod,
                responseBodyType,
                responseBody,
                groupId
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                details.path.as_str(),
                details.description.as_deref(),
                details.http_method.as_str(),
                details.response_body_type.as_str(),
                details.response_body.as_str(),
                group_id,
            ],
        )?;
        Ok(())
    }

    fn update_endpoint(&self, key: &EndpointKey, details: &EndpointDetails) -> StoreResult<()> {
        details.validate()?;

        let changed = self.conn.execute(
            "UPDATE EndpointDetails
             SET
                endpoint = ?1,
                description = ?2,
                HTTPMethod = ?3,
                responseBodyType = ?4,
                responseBody = ?5
             WHERE endpoint = ?6 AND HTTPMethod = ?7;",
            params![
                details.path.as_str(),
                details.description.as_deref(),
                details.http_method.as_str(),
                details.response_body_type.as_str(),
                details.response_body.as_str(),
                key.path.as_str(),
                key.http_method.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(MissingRow::Endpoint(key.clone())));
        }
        Ok(())
    }

    fn delete_endpoint(&self, group_id: GroupId, key: &EndpointKey) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM EndpointDetails
             WHERE endpoint = ?1 AND HTTPMethod = ?2 AND groupId = ?3;",
            params![key.path.as_str(), key.http_method.as_str(), group_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(MissingRow::Endpoint(key.clone())));
        }
        Ok(())
    }

    fn get_endpoint(&self, key: &EndpointKey) -> StoreResult<Option<Endpoint>> {
        let endpoint = self
            .conn
            .query_row(
                &format!("{ENDPOINT_SELECT_SQL} WHERE endpoint = ?1 AND HTTPMethod = ?2;"),
                params![key.path.as_str(), key.http_method.as_str()],
                parse_endpoint_row,
            )
            .optional()?;
        Ok(endpoint)
    }

    fn list_endpoints(&self, group_id: GroupId) -> StoreResult<Vec<Endpoint>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENDPOINT_SELECT_SQL}
             WHERE groupId = ?1
             ORDER BY endpoint ASC, HTTPMethod ASC;"
        ))?;
        let endpoints = stmt
            .query_map([group_id], parse_endpoint_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(endpoints)
    }
}

fn parse_endpoint_row(row: &Row<'_>) -> rusqlite::Result<Endpoint> {
    Ok(Endpoint {
        group_id: row.get("groupId")?,
        details: EndpointDetails {
            path: row.get("endpoint")?,
            description: row.get("description")?,
            http_method: row.get("HTTPMethod")?,
            response_body_type: row.get("responseBodyType")?,
            response_body: row.get("responseBody")?,
        },
    })
}
