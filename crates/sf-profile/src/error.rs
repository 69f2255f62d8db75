//! Error types for sf-profile

use thiserror::Error;

/// Profiling errors.
///
/// Degradation never escapes the profiler: [`crate::Profiler::profile`]
/// catches it, logs it, and emits the common block with a warning attribute
/// instead.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// F001: The family-specific statistics could not be computed
    #[error("[F001] {reason}")]
    Degraded { reason: String },
}

/// Result type alias for ProfileError
pub type ProfileResult<T> = Result<T, ProfileError>;
