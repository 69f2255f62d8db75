//! Loading of per-table description files.
//!
//! Datasets in the BIRD style ship a `database_description/` directory next
//! to each database: one CSV per table, keyed by column name, carrying
//! human-authored column and value descriptions. Everything here is
//! best-effort by contract: a missing directory or file yields an empty
//! mapping, a malformed file is logged, counted and skipped, and nothing is
//! ever fatal.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One row of a description CSV.
///
/// Files in the wild carry extra columns (data format, original table name);
/// only the recognized keys are read.
#[derive(Debug, Clone, Deserialize)]
struct DescriptionRow {
    original_column_name: String,

    #[serde(default)]
    column_description: Option<String>,

    #[serde(default)]
    value_description: Option<String>,
}

/// Descriptions of one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDescription {
    pub column_description: Option<String>,
    pub value_description: Option<String>,
}

/// Lookup of `(table, column)` → descriptions.
///
/// Column names match case-insensitively and ignore surrounding whitespace;
/// description files are hand-maintained and drift from the catalog casing.
#[derive(Debug, Clone, Default)]
pub struct TableDescriptions {
    entries: HashMap<(String, String), ColumnDescription>,

    /// Description files that could not be parsed
    pub files_skipped: usize,
}

impl TableDescriptions {
    /// Empty mapping, used when no description directory exists.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Descriptions for one column, if any.
    pub fn get(&self, table: &str, column: &str) -> Option<&ColumnDescription> {
        self.entries
            .get(&(normalize(table), normalize(column)))
    }

    fn insert(&mut self, table: &str, column: &str, description: ColumnDescription) {
        self.entries
            .insert((normalize(table), normalize(column)), description);
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn clean_cell(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Load descriptions for one database.
///
/// `description_dir` is the `database_description/` directory itself; when it
/// does not exist an empty mapping is returned without error.
pub fn load_descriptions(description_dir: &Path) -> TableDescriptions {
    let mut descriptions = TableDescriptions::empty();

    if !description_dir.is_dir() {
        log::debug!(
            "no description directory at {}, continuing without metadata",
            description_dir.display()
        );
        return descriptions;
    }

    let entries = match std::fs::read_dir(description_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!(
                "cannot read description directory {}: {e}",
                description_dir.display()
            );
            return descriptions;
        }
    };

    let mut files: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    for file in files {
        let Some(table) = file.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        match load_table_file(&file, &table, &mut descriptions) {
            Ok(rows) => log::debug!("loaded {rows} description rows for table '{table}'"),
            Err(e) => {
                log::warn!("skipping description file {}: {e}", file.display());
                descriptions.files_skipped += 1;
            }
        }
    }

    descriptions
}

fn load_table_file(
    path: &Path,
    table: &str,
    descriptions: &mut TableDescriptions,
) -> Result<usize, csv::Error> {
    // BIRD description files are not reliably UTF-8; replace invalid bytes
    // rather than reject the file.
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    // Parse the whole file before inserting anything, so a malformed file
    // is skipped in full rather than half-applied.
    let rows: Vec<DescriptionRow> = reader
        .deserialize::<DescriptionRow>()
        .collect::<Result<_, _>>()?;

    let count = rows.len();
    for row in rows {
        let description = ColumnDescription {
            column_description: clean_cell(row.column_description),
            value_description: clean_cell(row.value_description),
        };
        descriptions.insert(table, &row.original_column_name, description);
    }
    Ok(count)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
