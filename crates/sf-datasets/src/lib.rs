//! sf-datasets - NL-SQL benchmark loading for Schemaflow
//!
//! Harmonizes Spider and BIRD question/SQL records into one fixed shape
//! (`question`, `sql_query`, `evidence`, `db_id`) for consumers that pair
//! schema artifacts with benchmark questions.

pub mod error;
pub mod loader;

pub use error::{DatasetError, DatasetResult};
pub use loader::{db_ids, load, load_for_db, Dataset, DatasetPaths, QuestionRecord};
