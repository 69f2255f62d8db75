//! Type-family inference from declared column types.
//!
//! SQLite type strings are free-form ("varchar(40)", "UNSIGNED BIG INT",
//! "decimal(10,5)" all occur in the wild), so classification is a
//! case-insensitive substring match, checked in priority order.

use serde::{Deserialize, Serialize};

/// Statistical family a declared type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFamily {
    /// Whole-number columns (`INT` anywhere in the type)
    Integer,
    /// Floating/decimal columns
    Real,
    /// Boolean columns, profiled as numeric over {0, 1}
    Boolean,
    /// Date/time columns
    Temporal,
    /// Character data
    Textual,
    /// Anything else; only the common block is produced
    Opaque,
}

impl TypeFamily {
    /// Classify a raw declared type string.
    pub fn infer(declared_type: &str) -> Self {
        let ty = declared_type.to_uppercase();

        if ty.contains("INT") {
            TypeFamily::Integer
        } else if ["REAL", "FLOA", "DOUB", "DECIMAL", "NUMERIC"]
            .iter()
            .any(|m| ty.contains(m))
        {
            TypeFamily::Real
        } else if ty.contains("BOOL") {
            TypeFamily::Boolean
        } else if ty.contains("DATE") || ty.contains("TIME") {
            TypeFamily::Temporal
        } else if ["CHAR", "TEXT", "CLOB", "JSON"].iter().any(|m| ty.contains(m)) {
            TypeFamily::Textual
        } else {
            TypeFamily::Opaque
        }
    }

    /// True for the three families profiled numerically.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeFamily::Integer | TypeFamily::Real | TypeFamily::Boolean
        )
    }
}
