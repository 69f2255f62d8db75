//! sf-pipeline - Orchestration for Schemaflow
//!
//! Drives the access layer, metadata loader, profiler and graph builder in a
//! deterministic order and emits one validated artifact per database. Each
//! pipeline is strictly single-threaded and owns all of its state;
//! parallelism lives one level up, in the batch runner.

pub mod error;
pub mod pipeline;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::SchemaPipeline;
