//! Per-column statistics over a bounded value sample.
//!
//! The profiler is pure: given the same declared type, flags and value
//! sequence it always produces the same output. Family-specific computation
//! that fails degrades the column to its common block; it never aborts the
//! pipeline.

use crate::error::{ProfileError, ProfileResult};
use crate::family::TypeFamily;
use crate::temporal::{parse_timestamp, span_string};
use sf_core::config::ProfileLimits;
use sf_core::stats::{StatsRecord, TokenCount};
use sf_core::value::SqlValue;
use std::collections::HashMap;

/// At most this many frequency-one tokens survive into `word_frequency`.
const SINGLETON_CAP: usize = 3;

/// Frequency-one tokens longer than this are dropped outright.
const SINGLETON_MAX_LEN: usize = 20;

/// Marker appended to truncated textual samples.
const ELLIPSIS: &str = "...";

/// Statistics shared by every column regardless of family.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonStats {
    pub samples: Vec<String>,
    pub null_count: u64,
    pub data_integrity: String,
}

/// Family-specific statistics block.
#[derive(Debug, Clone, PartialEq)]
pub enum FamilyStats {
    Numeric(NumericStats),
    Textual(TextualStats),
    Temporal(TemporalStats),
    Opaque,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericStats {
    pub range: Option<[f64; 2]>,
    pub mean: Option<f64>,
    pub mode: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextualStats {
    pub categories: Option<Vec<String>>,
    pub avg_length: Option<f64>,
    pub word_frequency: Option<Vec<TokenCount>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalStats {
    pub time_span: Option<String>,
}

/// Complete profile of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub common: CommonStats,
    pub family: FamilyStats,

    /// Set when family statistics degraded to the common block
    pub warning: Option<String>,
}

impl From<ColumnProfile> for StatsRecord {
    fn from(profile: ColumnProfile) -> Self {
        let mut record = StatsRecord {
            samples: profile.common.samples,
            null_count: profile.common.null_count,
            data_integrity: profile.common.data_integrity,
            ..StatsRecord::default()
        };
        match profile.family {
            FamilyStats::Numeric(n) => {
                record.range = n.range;
                record.mean = n.mean;
                record.mode = n.mode;
            }
            FamilyStats::Textual(t) => {
                record.categories = t.categories;
                record.avg_length = t.avg_length;
                record.word_frequency = t.word_frequency;
            }
            FamilyStats::Temporal(t) => {
                record.time_span = t.time_span;
            }
            FamilyStats::Opaque => {}
        }
        record
    }
}

/// Computes column profiles under immutable limits.
#[derive(Debug, Clone)]
pub struct Profiler {
    limits: ProfileLimits,
}

impl Profiler {
    pub fn new(limits: ProfileLimits) -> Self {
        Self { limits }
    }

    /// Profile one column.
    ///
    /// `values` is the bounded sample read by the access layer; its length
    /// never exceeds the configured hard cap. Family failures are logged and
    /// folded into the returned profile as a warning.
    pub fn profile(
        &self,
        declared_type: &str,
        column_name: &str,
        is_primary_key: bool,
        values: &[SqlValue],
    ) -> ColumnProfile {
        let common = self.common_stats(values);
        let family = TypeFamily::infer(declared_type);

        let computed = match family {
            f if f.is_numeric() => self.numeric_stats(f, column_name, is_primary_key, values),
            TypeFamily::Textual => self.textual_stats(values),
            TypeFamily::Temporal => self.temporal_stats(values),
            _ => Ok(FamilyStats::Opaque),
        };

        match computed {
            Ok(family) => ColumnProfile {
                common,
                family,
                warning: None,
            },
            Err(ProfileError::Degraded { reason }) => {
                log::warn!("column '{column_name}': {reason}; keeping common block only");
                ColumnProfile {
                    common,
                    family: FamilyStats::Opaque,
                    warning: Some(reason),
                }
            }
        }
    }

    fn common_stats(&self, values: &[SqlValue]) -> CommonStats {
        let total = values.len();
        let null_count = values.iter().filter(|v| v.is_null()).count();
        let non_null = total - null_count;

        let samples = values
            .iter()
            .filter(|v| !v.is_null())
            .take(self.limits.sample_size)
            .map(|v| self.truncate_sample(&v.to_string()))
            .collect();

        let data_integrity = if total > 0 {
            let pct = (100.0 * non_null as f64 / total as f64).round() as u64;
            format!("{pct}%")
        } else {
            "0%".to_string()
        };

        CommonStats {
            samples,
            null_count: null_count as u64,
            data_integrity,
        }
    }

    fn truncate_sample(&self, s: &str) -> String {
        if s.chars().count() > self.limits.truncate_len {
            let mut truncated: String = s.chars().take(self.limits.truncate_len).collect();
            truncated.push_str(ELLIPSIS);
            truncated
        } else {
            s.to_string()
        }
    }

    fn numeric_stats(
        &self,
        family: TypeFamily,
        column_name: &str,
        is_primary_key: bool,
        values: &[SqlValue],
    ) -> ProfileResult<FamilyStats> {
        let non_null = values.iter().filter(|v| !v.is_null()).count();
        let parsed: Vec<f64> = values
            .iter()
            .filter(|v| !v.is_null())
            .filter_map(|v| coerce_numeric(family, v))
            .filter(|x| x.is_finite())
            .collect();

        if parsed.is_empty() {
            if non_null == 0 {
                return Ok(FamilyStats::Numeric(NumericStats::default()));
            }
            return Err(ProfileError::Degraded {
                reason: format!(
                    "none of {non_null} non-null values parsed as numbers"
                ),
            });
        }

        let min = parsed.iter().copied().fold(f64::INFINITY, f64::min);
        let max = parsed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = parsed.iter().sum::<f64>() / parsed.len() as f64;

        let mode = if is_identifier(column_name, is_primary_key) {
            None
        } else {
            mode_of(&parsed)
        };

        Ok(FamilyStats::Numeric(NumericStats {
            range: Some([min, max]),
            mean: Some(mean),
            mode,
        }))
    }

    fn textual_stats(&self, values: &[SqlValue]) -> ProfileResult<FamilyStats> {
        let strings: Vec<String> = values
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| v.to_string())
            .collect();

        let categories = {
            let mut distinct: Vec<String> = strings.clone();
            distinct.sort();
            distinct.dedup();
            (distinct.len() <= self.limits.category_threshold).then_some(distinct)
        };

        let avg_length = if strings.is_empty() {
            None
        } else {
            let total_chars: usize = strings.iter().map(|s| s.chars().count()).sum();
            Some(round1(total_chars as f64 / strings.len() as f64))
        };

        let word_frequency = if strings.is_empty() {
            None
        } else {
            Some(self.word_frequency(&strings))
        };

        Ok(FamilyStats::Textual(TextualStats {
            categories,
            avg_length,
            word_frequency,
        }))
    }

    /// Top tokens by descending frequency, ties broken by first occurrence.
    ///
    /// Frequency-one tokens are a long tail in free text; at most
    /// `SINGLETON_CAP` of them are retained and only when at most
    /// `SINGLETON_MAX_LEN` characters long. Tokens seen more than once are
    /// never displaced by singletons.
    fn word_frequency(&self, strings: &[String]) -> Vec<TokenCount> {
        let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
        let mut order = 0usize;
        for s in strings {
            for token in s.split_whitespace() {
                let entry = counts.entry(token).or_insert((0, order));
                entry.0 += 1;
                order += 1;
            }
        }

        let mut ranked: Vec<(&str, u64, usize)> = counts
            .into_iter()
            .map(|(token, (count, first))| (token, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let mut out = Vec::new();
        let mut singletons = 0usize;
        for (token, count, _) in ranked {
            if out.len() == self.limits.word_top_k {
                break;
            }
            if count == 1 {
                if singletons == SINGLETON_CAP || token.chars().count() > SINGLETON_MAX_LEN {
                    continue;
                }
                singletons += 1;
            }
            out.push(TokenCount {
                token: token.to_string(),
                count,
            });
        }
        out
    }

    fn temporal_stats(&self, values: &[SqlValue]) -> ProfileResult<FamilyStats> {
        let non_null = values.iter().filter(|v| !v.is_null()).count();
        let parsed: Vec<chrono::NaiveDateTime> = values
            .iter()
            .filter_map(|v| v.as_text())
            .filter_map(parse_timestamp)
            .collect();

        if parsed.is_empty() {
            if non_null == 0 {
                return Ok(FamilyStats::Temporal(TemporalStats::default()));
            }
            // Unparseable values count as nulls for this metric only; with
            // nothing left the family has nothing to say.
            return Err(ProfileError::Degraded {
                reason: format!(
                    "none of {non_null} non-null values parsed as timestamps"
                ),
            });
        }

        let (min, max) = match (parsed.iter().min(), parsed.iter().max()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return Ok(FamilyStats::Temporal(TemporalStats::default())),
        };

        Ok(FamilyStats::Temporal(TemporalStats {
            time_span: Some(span_string(max - min)),
        }))
    }
}

/// Numeric view of one value under a family.
fn coerce_numeric(family: TypeFamily, value: &SqlValue) -> Option<f64> {
    if family == TypeFamily::Boolean {
        if let SqlValue::Text(s) = value {
            match s.trim().to_lowercase().as_str() {
                "true" | "t" | "yes" => return Some(1.0),
                "false" | "f" | "no" => return Some(0.0),
                _ => {}
            }
        }
    }
    value.as_f64()
}

/// ID-like columns never emit a mode: primary keys and names ending in "id".
fn is_identifier(column_name: &str, is_primary_key: bool) -> bool {
    is_primary_key || column_name.to_lowercase().ends_with("id")
}

/// Most frequent value, when its frequency is at least 2.
///
/// Counting keys on the value's bit pattern keeps f64 hashable; ties resolve
/// to the earliest occurrence.
fn mode_of(parsed: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, (u64, usize)> = HashMap::new();
    for (idx, value) in parsed.iter().enumerate() {
        let entry = counts.entry(value.to_bits()).or_insert((0, idx));
        entry.0 += 1;
    }

    let best = counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))?;

    (best.1 .0 > 1).then(|| f64::from_bits(best.0))
}

/// Round to one decimal place.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "profiler_test.rs"]
mod tests;
