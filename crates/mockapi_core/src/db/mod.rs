//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the endpoint store.
//! - Ensure the `Groups` / `EndpointDetails` / `ResponseHeaders` tables exist.
//!
//! # Invariants
//! - Returned connections enforce foreign keys; every cascade rule depends on it.
//! - Table and column names are the on-disk contract shared with existing
//!   data files and must not be renamed.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub(crate) use open::bootstrap_connection;
pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_schema, verify_schema};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Connection was opened without `PRAGMA foreign_keys = ON`.
    ForeignKeysDisabled,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "endpoint store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "endpoint store requires column `{column}` in table `{table}`"
            ),
            Self::ForeignKeysDisabled => {
                write!(f, "endpoint store requires `PRAGMA foreign_keys = ON`")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::ForeignKeysDisabled => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
