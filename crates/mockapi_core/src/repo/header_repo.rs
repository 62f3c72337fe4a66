//! Response header repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Attach, rewrite and remove single header rows per endpoint.
//!
//! # Invariants
//! - Updates target headers by their own key on one endpoint; headers with
//!   other keys on the same endpoint are never touched.
//! - Deletes match the exact `(endpoint, HTTPMethod, key, value)` tuple.
//! - Listing preserves insertion order (`rowid`).

use crate::error::{MissingRow, StoreError, StoreResult};
use crate::model::endpoint::EndpointKey;
use crate::model::header::ResponseHeader;
use rusqlite::{params, Connection, Row};

/// Repository interface for response header operations.
pub trait HeaderRepository {
    fn add_header(&self, endpoint: &EndpointKey, header: &ResponseHeader) -> StoreResult<()>;
    /// Returns the number of rows rewritten (more than one only when the
    /// same key was added repeatedly).
    fn update_header(&self, endpoint: &EndpointKey, header: &ResponseHeader)
        -> StoreResult<usize>;
    fn delete_header(&self, endpoint: &EndpointKey, header: &ResponseHeader) -> StoreResult<()>;
    fn list_headers(&self, endpoint: &EndpointKey) -> StoreResult<Vec<ResponseHeader>>;
}

/// SQLite-backed response header repository.
pub struct SqliteHeaderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHeaderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl HeaderRepository for SqliteHeaderRepository<'_> {
    fn add_header(&self, endpoint: &EndpointKey, header: &ResponseHeader) -> StoreResult<()> {
        header.validate()?;

        self.conn.execute(
            "INSERT INTO ResponseHeaders (endpoint, HTTPMethod, key, value)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                endpoint.path.as_str(),
                endpoint.http_method.as_str(),
                header.key.as_str(),
                header.value.as_str(),
            ],
        )?;
        Ok(())
    }

    fn update_header(
        &self,
        endpoint: &EndpointKey,
        header: &ResponseHeader,
    ) -> StoreResult<usize> {
        header.validate()?;

        let changed = self.conn.execute(
            "UPDATE ResponseHeaders
             SET value = ?1
             WHERE endpoint = ?2 AND HTTPMethod = ?3 AND key = ?4;",
            params![
                header.value.as_str(),
                endpoint.path.as_str(),
                endpoint.http_method.as_str(),
                header.key.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(missing_header(endpoint, header));
        }
        Ok(changed)
    }

    fn delete_header(&self, endpoint: &EndpointKey, header: &ResponseHeader) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM ResponseHeaders
             WHERE endpoint = ?1 AND HTTPMethod = ?2 AND key = ?3 AND value = ?4;",
            params![
                endpoint.path.as_str(),
                endpoint.http_method.as_str(),
                header.key.as_str(),
                header.value.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(missing_header(endpoint, header));
        }
        Ok(())
    }

    fn list_headers(&self, endpoint: &EndpointKey) -> StoreResult<Vec<ResponseHeader>> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value
             FROM ResponseHeaders
             WHERE endpoint = ?1 AND HTTPMethod = ?2
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query(params![
            endpoint.path.as_str(),
            endpoint.http_method.as_str()
        ])?;

        let mut headers = Vec::new();
        while let Some(row) = rows.next()? {
            headers.push(parse_header_row(row, endpoint)?);
        }
        Ok(headers)
    }
}

// `key`/`value` are nullable in the shared schema; reject rather than mask.
fn parse_header_row(row: &Row<'_>, endpoint: &EndpointKey) -> StoreResult<ResponseHeader> {
    let key: Option<String> = row.get("key")?;
    let value: Option<String> = row.get("value")?;
    match (key, value) {
        (Some(key), Some(value)) => Ok(ResponseHeader { key, value }),
        _ => Err(StoreError::InvalidData(format!(
            "NULL key or value in ResponseHeaders for endpoint `{endpoint}`"
        ))),
    }
}

fn missing_header(endpoint: &EndpointKey, header: &ResponseHeader) -> StoreError {
    StoreError::NotFound(MissingRow::Header {
        endpoint: endpoint.clone(),
        key: header.key.clone(),
    })
}
