//! Error types for sf-core

use thiserror::Error;

/// Core error type for Schemaflow
#[derive(Error, Debug)]
pub enum CoreError {
    /// G001: A node with this key already exists in the graph
    #[error("[G001] Duplicate node: {key}")]
    DuplicateNode { key: String },

    /// G002: Column added against a table the graph does not contain
    #[error("[G002] Unknown table '{table}' for column '{column}'")]
    UnknownTable { table: String, column: String },

    /// G003: Edge endpoint is missing from the graph
    #[error("[G003] Unknown column '{table}.{column}' referenced by a foreign key")]
    UnknownColumn { table: String, column: String },

    /// G004: A structural invariant of the finished graph does not hold
    #[error("[G004] Graph invariant violated: {message}")]
    InvariantViolation { message: String },

    /// A001: Artifact references a node key that is not in its node list
    #[error("[A001] Artifact edge references unknown node key: {key}")]
    DanglingEdge { key: String },

    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// IO error with file path context
    #[error("Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
