//! Idempotent schema bootstrap and verification.
//!
//! # Responsibility
//! - Create the three store tables when absent.
//! - Reject connections that cannot honor the cascade contract.
//!
//! # Invariants
//! - `ensure_schema` is safe to run on every open; it never drops or alters.
//! - There is no schema versioning: the table layout is fixed.

use super::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("Groups", &["id", "name"]),
    (
        "EndpointDetails",
        &[
            "groupId",
            "endpoint",
            "description",
            "HTTPMethod",
            "responseBodyType",
            "responseBody",
        ],
    ),
    ("ResponseHeaders", &["endpoint", "HTTPMethod", "key", "value"]),
];

/// Creates every store table that does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Checks that the connection carries the expected tables, columns and
/// foreign-key enforcement.
///
/// # Errors
/// - `ForeignKeysDisabled` when `PRAGMA foreign_keys` is off.
/// - `MissingRequiredTable` / `MissingRequiredColumn` for schema drift.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    let foreign_keys: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if foreign_keys != 1 {
        return Err(DbError::ForeignKeysDisabled);
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(DbError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(DbError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
