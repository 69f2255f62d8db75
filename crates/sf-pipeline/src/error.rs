//! Error types for sf-pipeline

use thiserror::Error;

/// Pipeline orchestration errors
#[derive(Error, Debug)]
pub enum PipelineError {
    /// P001: Database access failed; the artifact would be incomplete
    #[error("[P001] {0}")]
    Db(#[from] sf_db::DbError),

    /// P002: A foreign key cannot be resolved to a concrete column pair
    #[error(
        "[P002] Unresolvable foreign key: {from_table}.{from_column} -> {to_table}: {reason}"
    )]
    UnresolvableFk {
        from_table: String,
        from_column: String,
        to_table: String,
        reason: String,
    },

    /// P003: Graph construction or validation failed
    #[error("[P003] {0}")]
    Graph(#[from] sf_core::CoreError),
}

/// Result type alias for PipelineError
pub type PipelineResult<T> = Result<T, PipelineError>;
