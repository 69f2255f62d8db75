//! Read-only SQLite catalog access and bounded row sampling.

use crate::error::{DbError, DbResult};
use rusqlite::{Connection, OpenFlags};
use sf_core::sql_utils::quote_ident;
use sf_core::value::SqlValue;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Column metadata as declared in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,

    /// Raw declared type string; may be empty in SQLite
    pub declared_type: String,

    pub is_nullable: bool,
    pub default: Option<String>,

    /// 1-based position within a composite primary key, if any
    pub pk_ordinal: Option<u32>,
}

/// One `(from, to)` column pair of a foreign-key declaration.
///
/// `to_column` is absent when the declaration omits the referenced column,
/// which in SQLite implies the target's primary key. `seq` is the pair's
/// position within a composite declaration and is used to resolve the
/// omission against a composite key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyInfo {
    pub from_column: String,
    pub to_table: String,
    pub to_column: Option<String>,
    pub seq: usize,
}

/// Full catalog description of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<ColumnInfo>,

    /// Primary-key columns in key order
    pub primary_key: Vec<String>,

    pub foreign_keys: Vec<ForeignKeyInfo>,
}

/// A read-only connection to one SQLite database.
///
/// Owned by a single pipeline; dropped (and with it the connection released)
/// when the pipeline completes or fails.
#[derive(Debug)]
pub struct SqliteSource {
    conn: Connection,
    path: PathBuf,
}

impl SqliteSource {
    /// Open the database read-only with the given busy timeout.
    ///
    /// Fails with `SourceUnavailable` when the file is missing or is not a
    /// valid SQLite database (detected by probing the catalog).
    pub fn open(path: &Path, busy_timeout: Duration) -> DbResult<Self> {
        if !path.is_file() {
            return Err(DbError::SourceUnavailable {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            DbError::SourceUnavailable {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        conn.busy_timeout(busy_timeout)?;

        // Probe the catalog: corrupt or non-SQLite files surface here,
        // before any pipeline work begins.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| DbError::SourceUnavailable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        log::debug!("opened {} read-only", path.display());
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// User tables in catalog order, excluding SQLite-internal tables.
    pub fn list_tables(&self) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Columns, primary key and foreign keys of one table.
    pub fn describe_table(&self, table: &str) -> DbResult<TableSchema> {
        let columns = self.table_columns(table)?;

        let mut keyed: Vec<(u32, String)> = columns
            .iter()
            .filter_map(|c| c.pk_ordinal.map(|ord| (ord, c.name.clone())))
            .collect();
        keyed.sort_by_key(|(ord, _)| *ord);
        let primary_key = keyed.into_iter().map(|(_, name)| name).collect();

        let foreign_keys = self.table_foreign_keys(table)?;

        Ok(TableSchema {
            columns,
            primary_key,
            foreign_keys,
        })
    }

    fn table_columns(&self, table: &str) -> DbResult<Vec<ColumnInfo>> {
        let sql = format!("PRAGMA table_info({})", quote_ident(table));
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| Self::query_failed(table, e))?;

        let rows = stmt
            .query_map([], |row| {
                let notnull: i64 = row.get("notnull")?;
                let pk: i64 = row.get("pk")?;
                Ok(ColumnInfo {
                    name: row.get("name")?,
                    declared_type: row.get::<_, Option<String>>("type")?.unwrap_or_default(),
                    is_nullable: notnull == 0,
                    default: row.get("dflt_value")?,
                    pk_ordinal: (pk > 0).then_some(pk as u32),
                })
            })
            .map_err(|e| Self::query_failed(table, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Self::query_failed(table, e))?;

        Ok(rows)
    }

    fn table_foreign_keys(&self, table: &str) -> DbResult<Vec<ForeignKeyInfo>> {
        let sql = format!("PRAGMA foreign_key_list({})", quote_ident(table));
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| Self::query_failed(table, e))?;

        let rows = stmt
            .query_map([], |row| {
                let seq: i64 = row.get("seq")?;
                Ok(ForeignKeyInfo {
                    from_column: row.get("from")?,
                    to_table: row.get("table")?,
                    to_column: row.get("to")?,
                    seq: seq as usize,
                })
            })
            .map_err(|e| Self::query_failed(table, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Self::query_failed(table, e))?;

        Ok(rows)
    }

    /// Actual row count of the table.
    pub fn row_count(&self, table: &str) -> DbResult<u64> {
        let sql = format!("SELECT count(*) FROM {}", quote_ident(table));
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| Self::query_failed(table, e))?;
        Ok(count.max(0) as u64)
    }

    /// The first `limit` values of one column, in storage order.
    ///
    /// Deliberately deterministic: large tables are truncated to their first
    /// rows rather than sampled at random, so repeated runs produce identical
    /// artifacts.
    pub fn sample_values(&self, table: &str, column: &str, limit: usize) -> DbResult<Vec<SqlValue>> {
        let sql = format!(
            "SELECT {} FROM {} LIMIT {}",
            quote_ident(column),
            quote_ident(table),
            limit
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| Self::query_failed(table, e))?;

        let rows = stmt
            .query_map([], |row| {
                let value = match row.get_ref(0)? {
                    rusqlite::types::ValueRef::Null => SqlValue::Null,
                    rusqlite::types::ValueRef::Integer(i) => SqlValue::Integer(i),
                    rusqlite::types::ValueRef::Real(r) => SqlValue::Real(r),
                    rusqlite::types::ValueRef::Text(t) => {
                        SqlValue::Text(String::from_utf8_lossy(t).into_owned())
                    }
                    rusqlite::types::ValueRef::Blob(b) => SqlValue::Blob(b.len()),
                };
                Ok(value)
            })
            .map_err(|e| Self::query_failed(table, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Self::query_failed(table, e))?;

        Ok(rows)
    }

    fn query_failed(table: &str, source: rusqlite::Error) -> DbError {
        DbError::QueryFailed {
            table: table.to_string(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;
