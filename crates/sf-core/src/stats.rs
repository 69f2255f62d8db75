//! Wire representation of per-column statistics.
//!
//! The profiler works with a tagged `{common, family}` model; on the artifact
//! every statistic flattens into the column node's attribute map. This module
//! holds that flat record so readers and writers share one shape. Optional
//! fields are skipped entirely when absent, which is how family membership is
//! expressed on the wire: a numeric column carries `range`/`mean`, a textual
//! one `avg_length`, a temporal one `time_span`.

use serde::{Deserialize, Serialize};

/// One entry of a `word_frequency` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: u64,
}

/// Flattened statistics block carried by every Column node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Up to six non-null values in input order, long text truncated
    #[serde(default)]
    pub samples: Vec<String>,

    /// Count of null/missing values in the profiled sample
    #[serde(default)]
    pub null_count: u64,

    /// Percentage of non-null values, e.g. "98%"
    #[serde(default)]
    pub data_integrity: String,

    // Numeric family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<f64>,

    // Textual family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_length: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_frequency: Option<Vec<TokenCount>>,

    // Temporal family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_span: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_family_fields_are_not_serialized() {
        let record = StatsRecord {
            samples: vec!["1".to_string()],
            null_count: 0,
            data_integrity: "100%".to_string(),
            range: Some([1.0, 3.0]),
            mean: Some(2.0),
            ..StatsRecord::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        let map = json.as_object().unwrap();
        assert!(map.contains_key("range"));
        assert!(map.contains_key("mean"));
        assert!(!map.contains_key("mode"));
        assert!(!map.contains_key("categories"));
        assert!(!map.contains_key("time_span"));
    }

    #[test]
    fn test_round_trip() {
        let record = StatsRecord {
            samples: vec!["alice".to_string()],
            null_count: 2,
            data_integrity: "60%".to_string(),
            categories: Some(vec!["alice".to_string(), "bob".to_string()]),
            avg_length: Some(4.5),
            word_frequency: Some(vec![TokenCount {
                token: "alice".to_string(),
                count: 2,
            }]),
            ..StatsRecord::default()
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: StatsRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
