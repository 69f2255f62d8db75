//! Error types for sf-datasets

use crate::loader::Dataset;
use std::path::PathBuf;
use thiserror::Error;

/// Dataset loading errors
#[derive(Error, Debug)]
pub enum DatasetError {
    /// N001: The dataset tag is not one of the supported datasets
    #[error("[N001] Unknown dataset '{name}', expected one of: spider, spider_dev, bird, bird_dev")]
    UnknownDataset { name: String },

    /// N002: No file path configured for the requested dataset
    #[error("[N002] No JSON path configured for dataset '{dataset}'")]
    Unconfigured { dataset: Dataset },

    /// N003: A dataset file could not be read
    #[error("[N003] Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// N004: A dataset file is not valid JSON of the expected shape
    #[error("[N004] Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for DatasetError
pub type DatasetResult<T> = Result<T, DatasetError>;
