//! sf-meta - Human-authored description loading for Schemaflow
//!
//! Reads the optional `database_description/` directory shipped beside a
//! database (one CSV per table) into a `(table, column)` lookup. Missing or
//! malformed inputs are never fatal; the pipeline reports them in its run
//! summary.

pub mod loader;

pub use loader::{load_descriptions, ColumnDescription, TableDescriptions};
