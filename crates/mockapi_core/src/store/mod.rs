//! Endpoint store facade.
//!
//! # Responsibility
//! - Own the single SQLite connection backing one definition store.
//! - Expose one entry point per entity operation, resolving group names
//!   before dependent endpoint mutations.
//! - Log every outcome at the boundary and return it to the caller.
//!
//! # Invariants
//! - Construction fails hard when the schema cannot be ensured.
//! - Each public call is one autocommitted statement group; no transaction
//!   spans two calls.
//! - Child rows are only ever removed through foreign-key cascades.

use crate::db::{bootstrap_connection, open_db, open_db_in_memory, verify_schema};
use crate::error::{StoreError, StoreResult};
use crate::model::endpoint::{Endpoint, EndpointDetails, EndpointKey};
use crate::model::group::{Group, GroupId};
use crate::model::header::ResponseHeader;
use crate::repo::endpoint_repo::{EndpointRepository, SqliteEndpointRepository};
use crate::repo::group_repo::{GroupRepository, SqliteGroupRepository};
use crate::repo::header_repo::{HeaderRepository, SqliteHeaderRepository};
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

mod snapshot;

pub use snapshot::{EndpointSnapshot, GroupSnapshot};

/// Data-access object over the `Groups` / `EndpointDetails` /
/// `ResponseHeaders` tables.
///
/// Not `Sync`: concurrent callers must serialize access themselves.
pub struct EndpointStore {
    conn: Connection,
}

impl EndpointStore {
    /// Opens (or creates) a store file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_db(path)?;
        Self::checked(conn)
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        Self::checked(conn)
    }

    /// Takes ownership of an already opened connection and prepares it.
    ///
    /// # Errors
    /// - Pragma or schema bootstrap failures.
    /// - Pre-existing tables that lack the expected columns.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        bootstrap_connection(&conn)?;
        Self::checked(conn)
    }

    fn checked(conn: Connection) -> StoreResult<Self> {
        if let Err(err) = verify_schema(&conn) {
            error!(
                "event=store_init module=store status=error error_code=schema_invalid error={}",
                err
            );
            return Err(err.into());
        }
        info!("event=store_init module=store status=ok");
        Ok(Self { conn })
    }

    /// Borrow of the underlying connection for read-only inspection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the owned connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn groups(&self) -> SqliteGroupRepository<'_> {
        SqliteGroupRepository::new(&self.conn)
    }

    fn endpoints(&self) -> SqliteEndpointRepository<'_> {
        SqliteEndpointRepository::new(&self.conn)
    }

    fn headers(&self) -> SqliteHeaderRepository<'_> {
        SqliteHeaderRepository::new(&self.conn)
    }

    /// Creates a group and returns its auto-assigned id.
    ///
    /// Fails with `ConstraintViolation` when the name is taken.
    pub fn create_group(&self, name: &str) -> StoreResult<GroupId> {
        let started_at = Instant::now();
        let result = self.groups().create_group(name);
        log_outcome("group_create", started_at, &result);
        result
    }

    /// Deletes a group and, through cascade, its endpoints and headers.
    pub fn delete_group(&self, name: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.groups().delete_group(name);
        log_outcome("group_delete", started_at, &result);
        result
    }

    pub fn rename_group(&self, old_name: &str, new_name: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.groups().rename_group(old_name, new_name);
        log_outcome("group_rename", started_at, &result);
        result
    }

    /// Resolves a group name to its id; `None` when no such group exists.
    pub fn lookup_group_id(&self, name: &str) -> StoreResult<Option<GroupId>> {
        let started_at = Instant::now();
        let result = self.groups().find_group_id(name);
        if let Ok(None) = result {
            debug!("event=group_lookup module=store status=not_found group_name={name}");
        }
        log_read("group_lookup", started_at, &result);
        result
    }

    pub fn get_group(&self, name: &str) -> StoreResult<Option<Group>> {
        let started_at = Instant::now();
        let result = self.groups().get_group(name);
        log_read("group_get", started_at, &result);
        result
    }

    /// Lists all groups in creation order.
    pub fn list_groups(&self) -> StoreResult<Vec<Group>> {
        let started_at = Instant::now();
        let result = self.groups().list_groups();
        log_read("group_list", started_at, &result);
        result
    }

    /// Attaches a new endpoint to the named group.
    ///
    /// # Errors
    /// - `GroupNotFound` when `group_name` does not resolve; nothing is written.
    /// - `ConstraintViolation` when `(endpoint, HTTPMethod)` already exists in
    ///   any group.
    pub fn create_endpoint(&self, group_name: &str, details: &EndpointDetails) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .resolve_group(group_name)
            .and_then(|group_id| self.endpoints().create_endpoint(group_id, details));
        log_outcome("endpoint_create", started_at, &result);
        result
    }

    /// Overwrites the endpoint at `key` with `details`.
    ///
    /// When `details` carries a different key the row is re-keyed and its
    /// headers follow through `ON UPDATE CASCADE`. The owning group never
    /// changes.
    pub fn update_endpoint(&self, key: &EndpointKey, details: &EndpointDetails) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.endpoints().update_endpoint(key, details);
        log_outcome("endpoint_update", started_at, &result);
        result
    }

    /// Deletes the endpoint at `key` only if it belongs to `group_name`.
    pub fn delete_endpoint(&self, group_name: &str, key: &EndpointKey) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .resolve_group(group_name)
            .and_then(|group_id| self.endpoints().delete_endpoint(group_id, key));
        log_outcome("endpoint_delete", started_at, &result);
        result
    }

    pub fn get_endpoint(&self, key: &EndpointKey) -> StoreResult<Option<Endpoint>> {
        let started_at = Instant::now();
        let result = self.endpoints().get_endpoint(key);
        log_read("endpoint_get", started_at, &result);
        result
    }

    /// Lists endpoints of one group ordered by path, then method.
    pub fn list_endpoints(&self, group_name: &str) -> StoreResult<Vec<Endpoint>> {
        let started_at = Instant::now();
        let result = self
            .resolve_group(group_name)
            .and_then(|group_id| self.endpoints().list_endpoints(group_id));
        log_read("endpoint_list", started_at, &result);
        result
    }

    /// Adds one header row. A missing endpoint is a `ConstraintViolation`.
    pub fn add_response_header(
        &self,
        endpoint: &EndpointKey,
        header: &ResponseHeader,
    ) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.headers().add_header(endpoint, header);
        log_outcome("header_add", started_at, &result);
        result
    }

    /// Sets the value of the header named `header.key` on `endpoint`.
    ///
    /// Returns the number of header rows rewritten.
    pub fn update_response_header(
        &self,
        endpoint: &EndpointKey,
        header: &ResponseHeader,
    ) -> StoreResult<usize> {
        let started_at = Instant::now();
        let result = self.headers().update_header(endpoint, header);
        log_outcome("header_update", started_at, &result);
        result
    }

    /// Deletes header rows matching key and value exactly.
    pub fn delete_response_header(
        &self,
        endpoint: &EndpointKey,
        header: &ResponseHeader,
    ) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.headers().delete_header(endpoint, header);
        log_outcome("header_delete", started_at, &result);
        result
    }

    pub fn list_response_headers(
        &self,
        endpoint: &EndpointKey,
    ) -> StoreResult<Vec<ResponseHeader>> {
        let started_at = Instant::now();
        let result = self.headers().list_headers(endpoint);
        log_read("header_list", started_at, &result);
        result
    }

    /// Reads the full group → endpoint → header tree.
    pub fn snapshot(&self) -> StoreResult<Vec<GroupSnapshot>> {
        let started_at = Instant::now();
        let result = self.collect_snapshot();
        log_read("snapshot", started_at, &result);
        result
    }

    fn collect_snapshot(&self) -> StoreResult<Vec<GroupSnapshot>> {
        let endpoints = self.endpoints();
        let headers = self.headers();

        let mut groups = Vec::new();
        for group in self.groups().list_groups()? {
            let mut group_endpoints = Vec::new();
            for endpoint in endpoints.list_endpoints(group.id)? {
                let endpoint_headers = headers.list_headers(&endpoint.key())?;
                group_endpoints.push(EndpointSnapshot {
                    details: endpoint.details,
                    headers: endpoint_headers,
                });
            }
            groups.push(GroupSnapshot {
                id: group.id,
                name: group.name,
                endpoints: group_endpoints,
            });
        }
        Ok(groups)
    }

    fn resolve_group(&self, group_name: &str) -> StoreResult<GroupId> {
        self.groups()
            .find_group_id(group_name)?
            .ok_or_else(|| StoreError::GroupNotFound(group_name.to_string()))
    }
}

fn log_outcome<T>(event: &str, started_at: Instant, result: &StoreResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event={event} module=store status=ok duration_ms={duration_ms}"),
        Err(err) => log_failure(event, duration_ms, err),
    }
}

/// Reads succeed quietly at debug level; failures log like mutations.
fn log_read<T>(event: &str, started_at: Instant, result: &StoreResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => debug!("event={event} module=store status=ok duration_ms={duration_ms}"),
        Err(err) => log_failure(event, duration_ms, err),
    }
}

fn log_failure(event: &str, duration_ms: u128, err: &StoreError) {
    match err {
        StoreError::Db(err) => error!(
            "event={event} module=store status=error duration_ms={duration_ms} error_code=db_failure error={err}"
        ),
        StoreError::NotFound(_) | StoreError::GroupNotFound(_) => warn!(
            "event={event} module=store status=not_found duration_ms={duration_ms} error={err}"
        ),
        _ => warn!(
            "event={event} module=store status=rejected duration_ms={duration_ms} error={err}"
        ),
    }
}
