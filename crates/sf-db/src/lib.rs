//! sf-db - Read-only SQLite access layer for Schemaflow
//!
//! This crate exposes the catalog queries and bounded row sampling the
//! pipeline needs: table listing, column/key/foreign-key description, row
//! counts, and deterministic first-N value reads.

pub mod error;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use sqlite::{ColumnInfo, ForeignKeyInfo, SqliteSource, TableSchema};
