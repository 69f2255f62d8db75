//! sf-core - Core library for Schemaflow
//!
//! This crate provides the shared model used across all Schemaflow
//! components: configuration parsing, error types, the schema graph with its
//! builder and invariant checks, and the serialized artifact format.

pub mod artifact;
pub mod builder;
pub mod checksum;
pub mod config;
pub mod error;
pub mod graph;
pub mod node;
pub mod sql_utils;
pub mod stats;
pub mod value;

pub use artifact::{RunSummary, SchemaArtifact};
pub use builder::GraphBuilder;
pub use config::{Config, ProfileLimits};
pub use error::{CoreError, CoreResult};
pub use graph::SchemaGraph;
pub use node::{ColumnNode, Edge, ForeignKeyEdge, Node, PrimaryKey, RelationType, TableNode};
pub use stats::StatsRecord;
pub use value::SqlValue;
