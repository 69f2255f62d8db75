//! Error types for sf-db

use std::path::PathBuf;
use thiserror::Error;

/// Database access errors
#[derive(Error, Debug)]
pub enum DbError {
    /// D001: The database file cannot be opened or is not a SQLite database
    #[error("[D001] Source database unavailable: {path}: {message}")]
    SourceUnavailable { path: PathBuf, message: String },

    /// D002: A catalog or sampling query failed
    #[error("[D002] Query failed on table '{table}': {source}")]
    QueryFailed {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    /// D003: SQLite driver error outside any one table's scope
    #[error("[D003] SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
