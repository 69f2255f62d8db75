//! Configuration types and parsing for schemaflow.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration, loaded from schemaflow.yml or defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQLite busy timeout in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Directory name searched next to each database for description files
    #[serde(default = "default_metadata_dir_name")]
    pub metadata_dir_name: String,

    /// Worker count for the batch runner (defaults to the CPU count)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Profiling limits
    #[serde(default)]
    pub profile: ProfileLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            busy_timeout_ms: default_busy_timeout_ms(),
            metadata_dir_name: default_metadata_dir_name(),
            workers: None,
            profile: ProfileLimits::default(),
        }
    }
}

/// Bounds applied to per-column profiling.
///
/// Passed by value into the pipeline; nothing reads these from global state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileLimits {
    /// Upper bound on rows read per table for profiling
    #[serde(default = "default_hard_cap")]
    pub hard_cap: usize,

    /// Number of sample values retained per column
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Character length at which textual samples are truncated
    #[serde(default = "default_truncate_len")]
    pub truncate_len: usize,

    /// Maximum distinct values for a textual column to emit `categories`
    #[serde(default = "default_category_threshold")]
    pub category_threshold: usize,

    /// Number of tokens retained in `word_frequency`
    #[serde(default = "default_word_top_k")]
    pub word_top_k: usize,
}

impl Default for ProfileLimits {
    fn default() -> Self {
        Self {
            hard_cap: default_hard_cap(),
            sample_size: default_sample_size(),
            truncate_len: default_truncate_len(),
            category_threshold: default_category_threshold(),
            word_top_k: default_word_top_k(),
        }
    }
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_metadata_dir_name() -> String {
    "database_description".to_string()
}

fn default_hard_cap() -> usize {
    100_000
}

fn default_sample_size() -> usize {
    6
}

fn default_truncate_len() -> usize {
    30
}

fn default_category_threshold() -> usize {
    6
}

fn default_word_top_k() -> usize {
    10
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, falling back to defaults when no
    /// schemaflow.yml / schemaflow.yaml is present.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("schemaflow.yml");
        let yaml_path = dir.join("schemaflow.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.profile.hard_cap == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "profile.hard_cap must be at least 1".to_string(),
            });
        }

        if self.profile.sample_size == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "profile.sample_size must be at least 1".to_string(),
            });
        }

        if let Some(0) = self.workers {
            return Err(CoreError::ConfigInvalid {
                message: "workers must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
