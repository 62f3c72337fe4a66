//! Store-level error type shared by repositories and the store facade.
//!
//! # Invariants
//! - SQLite constraint failures (unique, primary key, foreign key) surface as
//!   `ConstraintViolation`, every other engine failure as `Db`.
//! - A mutation that matched no row is `NotFound`, never silent success.

use crate::db::DbError;
use crate::model::endpoint::EndpointKey;
use crate::model::ModelValidationError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Row a mutation expected to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingRow {
    Group(String),
    Endpoint(EndpointKey),
    Header { endpoint: EndpointKey, key: String },
}

impl Display for MissingRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Group(name) => write!(f, "group `{name}`"),
            Self::Endpoint(key) => write!(f, "endpoint `{key}`"),
            Self::Header { endpoint, key } => {
                write!(f, "response header `{key}` on endpoint `{endpoint}`")
            }
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// Caller-supplied fields failed model validation; nothing was written.
    Validation(ModelValidationError),
    /// Engine or connection failure.
    Db(DbError),
    /// Unique, primary-key or foreign-key constraint rejected the write.
    ConstraintViolation(String),
    /// Group name lookup failed before a dependent endpoint mutation.
    GroupNotFound(String),
    /// Update/delete target row does not exist; nothing changed.
    NotFound(MissingRow),
    /// Persisted row cannot be converted into the read model.
    InvalidData(String),
}

impl StoreError {
    /// True for the "target absent, nothing changed" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::GroupNotFound(name) => write!(f, "group not found: {name}"),
            Self::NotFound(row) => write!(f, "{row} not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::ConstraintViolation(_) => None,
            Self::GroupNotFound(_) => None,
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for StoreError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => err.into(),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, message) = &value {
            if err.code == ErrorCode::ConstraintViolation {
                return Self::ConstraintViolation(
                    message.clone().unwrap_or_else(|| err.to_string()),
                );
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{MissingRow, StoreError};
    use crate::model::endpoint::EndpointKey;
    use rusqlite::Connection;

    #[test]
    fn unique_failure_maps_to_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err: StoreError = conn
            .execute("INSERT INTO t VALUES ('a');", [])
            .unwrap_err()
            .into();
        match err {
            StoreError::ConstraintViolation(message) => assert!(message.contains("UNIQUE")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn syntax_failure_maps_to_db_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err: StoreError = conn.execute("SELEC 1;", []).unwrap_err().into();
        assert!(matches!(err, StoreError::Db(_)));
    }

    #[test]
    fn not_found_display_names_the_row() {
        let err = StoreError::NotFound(MissingRow::Header {
            endpoint: EndpointKey::new("/a", "GET"),
            key: "X-Trace".to_string(),
        });
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "response header `X-Trace` on endpoint `GET /a` not found"
        );
    }
}
