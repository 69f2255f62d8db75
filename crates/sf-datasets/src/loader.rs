//! Loading and harmonization of NL-SQL benchmark records.
//!
//! Spider and BIRD ship near-identical JSON shapes with diverging field
//! names (`query` vs `SQL`; `evidence` exists only in BIRD). Records are
//! normalized to one fixed shape so downstream consumers never branch on the
//! dataset.

use crate::error::{DatasetError, DatasetResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported benchmark datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Spider,
    SpiderDev,
    Bird,
    BirdDev,
}

impl Dataset {
    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Spider => "spider",
            Dataset::SpiderDev => "spider_dev",
            Dataset::Bird => "bird",
            Dataset::BirdDev => "bird_dev",
        }
    }
}

impl FromStr for Dataset {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spider" => Ok(Dataset::Spider),
            "spider_dev" => Ok(Dataset::SpiderDev),
            "bird" => Ok(Dataset::Bird),
            "bird_dev" => Ok(Dataset::BirdDev),
            other => Err(DatasetError::UnknownDataset {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File locations for each dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub spider_train: Option<PathBuf>,

    /// Spider's supplementary train split, merged into `spider`
    pub spider_train_other: Option<PathBuf>,

    pub spider_dev: Option<PathBuf>,
    pub bird_train: Option<PathBuf>,
    pub bird_dev: Option<PathBuf>,
}

impl DatasetPaths {
    /// JSON files backing one dataset, in load order.
    fn files(&self, dataset: Dataset) -> DatasetResult<Vec<&Path>> {
        let files: Vec<&Path> = match dataset {
            Dataset::Spider => [&self.spider_train, &self.spider_train_other]
                .into_iter()
                .flatten()
                .map(PathBuf::as_path)
                .collect(),
            Dataset::SpiderDev => self.spider_dev.iter().map(PathBuf::as_path).collect(),
            Dataset::Bird => self.bird_train.iter().map(PathBuf::as_path).collect(),
            Dataset::BirdDev => self.bird_dev.iter().map(PathBuf::as_path).collect(),
        };

        if files.is_empty() {
            return Err(DatasetError::Unconfigured { dataset });
        }
        Ok(files)
    }
}

/// One harmonized NL-SQL record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,

    /// Normalized SQL: trimmed, no trailing semicolon
    pub sql_query: String,

    /// BIRD's free-text hint; `None` for datasets without it
    pub evidence: Option<String>,

    pub db_id: String,
}

/// Raw record as found in the JSON files, before harmonization.
#[derive(Debug, Deserialize)]
struct RawRecord {
    db_id: String,
    question: String,

    /// Spider names this `query`, BIRD names it `SQL`
    #[serde(alias = "SQL")]
    query: String,

    #[serde(default)]
    evidence: Option<String>,
}

/// Strip surrounding whitespace and any trailing semicolons.
fn normalize_sql(sql: &str) -> String {
    sql.trim().trim_end_matches(';').trim_end().to_string()
}

/// Load one dataset's records, harmonized.
pub fn load(dataset: Dataset, paths: &DatasetPaths) -> DatasetResult<Vec<QuestionRecord>> {
    let mut records = Vec::new();

    for file in paths.files(dataset)? {
        let content = std::fs::read_to_string(file).map_err(|e| DatasetError::Io {
            path: file.to_path_buf(),
            source: e,
        })?;
        let raw: Vec<RawRecord> =
            serde_json::from_str(&content).map_err(|e| DatasetError::Parse {
                path: file.to_path_buf(),
                source: e,
            })?;

        log::debug!("{dataset}: loaded {} records from {}", raw.len(), file.display());

        records.extend(raw.into_iter().map(|r| QuestionRecord {
            question: r.question.trim().to_string(),
            sql_query: normalize_sql(&r.query),
            evidence: r.evidence.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
            db_id: r.db_id,
        }));
    }

    Ok(records)
}

/// Load one dataset, keeping only records for `db_id`.
pub fn load_for_db(
    dataset: Dataset,
    paths: &DatasetPaths,
    db_id: &str,
) -> DatasetResult<Vec<QuestionRecord>> {
    let mut records = load(dataset, paths)?;
    records.retain(|r| r.db_id == db_id);
    Ok(records)
}

/// Distinct database ids in a dataset, sorted.
pub fn db_ids(dataset: Dataset, paths: &DatasetPaths) -> DatasetResult<Vec<String>> {
    let records = load(dataset, paths)?;
    let ids: BTreeSet<String> = records.into_iter().map(|r| r.db_id).collect();
    Ok(ids.into_iter().collect())
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
