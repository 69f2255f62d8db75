//! sf-profile - Bounded per-column data profiling for Schemaflow
//!
//! Given a column's declared type and a bounded value sample, this crate
//! infers the statistical family and computes the statistics block merged
//! into Column nodes: null accounting and samples for every column, plus
//! range/mean/mode, categories/lengths/word frequencies, or time spans
//! depending on the family.

pub mod error;
pub mod family;
pub mod profiler;
pub mod temporal;

pub use error::{ProfileError, ProfileResult};
pub use family::TypeFamily;
pub use profiler::{
    ColumnProfile, CommonStats, FamilyStats, NumericStats, Profiler, TemporalStats, TextualStats,
};
