//! Group repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `Groups` table keyed by unique name.
//! - Resolve group names to numeric ids for dependent endpoint writes.
//!
//! # Invariants
//! - Deleting a group relies on `ON DELETE CASCADE`; children are never
//!   removed manually.

use crate::error::{MissingRow, StoreError, StoreResult};
use crate::model::group::{Group, GroupId};
use crate::model::validate_group_name;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for group operations.
pub trait GroupRepository {
    fn create_group(&self, name: &str) -> StoreResult<GroupId>;
    fn rename_group(&self, old_name: &str, new_name: &str) -> StoreResult<()>;
    fn delete_group(&self, name: &str) -> StoreResult<()>;
    fn find_group_id(&self, name: &str) -> StoreResult<Option<GroupId>>;
    fn get_group(&self, name: &str) -> StoreResult<Option<Group>>;
    fn list_groups(&self) -> StoreResult<Vec<Group>>;
}

/// SQLite-backed group repository.
pub struct SqliteGroupRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGroupRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GroupRepository for SqliteGroupRepository<'_> {
    fn create_group(&self, name: &str) -> StoreResult<GroupId> {
        validate_group_name(name)?;

        self.conn
            .execute("INSERT INTO Groups (name) VALUES (?1);", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn rename_group(&self, old_name: &str, new_name: &str) -> StoreResult<()> {
        validate_group_name(new_name)?;

        let changed = self.conn.execute(
            "UPDATE Groups SET name = ?1 WHERE name = ?2;",
            params![new_name, old_name],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(MissingRow::Group(old_name.to_string())));
        }
        Ok(())
    }

    fn delete_group(&self, name: &str) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM Groups WHERE name = ?1;", [name])?;
        if changed == 0 {
            return Err(StoreError::NotFound(MissingRow::Group(name.to_string())));
        }
        Ok(())
    }

    fn find_group_id(&self, name: &str) -> StoreResult<Option<GroupId>> {
        let id = self
            .conn
            .query_row("SELECT id FROM Groups WHERE name = ?1;", [name], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(id)
    }

    fn get_group(&self, name: &str) -> StoreResult<Option<Group>> {
        let group = self
            .conn
            .query_row(
                "SELECT id, name FROM Groups WHERE name = ?1;",
                [name],
                parse_group_row,
            )
            .optional()?;
        Ok(group)
    }

    fn list_groups(&self) -> StoreResult<Vec<Group>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM Groups ORDER BY id ASC;")?;
        let groups = stmt
            .query_map([], parse_group_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }
}

fn parse_group_row(row: &Row<'_>) -> rusqlite::Result<Group> {
    Ok(Group {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
