//! Engine-neutral value model for sampled column data.
//!
//! The profiler never sees `rusqlite` types directly; the access layer maps
//! rows into this enum so profiling stays decoupled from the driver.

use std::fmt;

/// One raw value read from a column.
///
/// Blob payloads are never carried through the pipeline; only their length
/// survives, which is all profiling needs.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(usize),
}

impl SqlValue {
    /// True for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Numeric view of the value, parsing declared-decimal text to double.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Integer(i) => Some(*i as f64),
            SqlValue::Real(r) => Some(*r),
            SqlValue::Text(s) => s.trim().parse::<f64>().ok(),
            SqlValue::Null | SqlValue::Blob(_) => None,
        }
    }

    /// Textual view of the value, if it carries one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(i) => write!(f, "{i}"),
            SqlValue::Real(r) => write!(f, "{r}"),
            SqlValue::Text(s) => write!(f, "{s}"),
            SqlValue::Blob(len) => write!(f, "<blob {len} bytes>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64_parses_decimal_text() {
        assert_eq!(SqlValue::Text(" 12.5 ".to_string()).as_f64(), Some(12.5));
        assert_eq!(SqlValue::Text("abc".to_string()).as_f64(), None);
        assert_eq!(SqlValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(SqlValue::Null.as_f64(), None);
    }

    #[test]
    fn test_display_blob_hides_payload() {
        assert_eq!(SqlValue::Blob(42).to_string(), "<blob 42 bytes>");
    }
}
