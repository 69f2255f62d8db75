//! Serialized form of the schema graph.
//!
//! One JSON artifact per database. Writes go to a temporary file in the
//! target directory and are atomically renamed into place, so an interrupted
//! run never leaves a partial artifact visible.

use crate::error::{CoreError, CoreResult};
use crate::graph::SchemaGraph;
use crate::node::{Edge, Node};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A node entry: the node's key plus its attribute map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    pub key: String,

    #[serde(flatten)]
    pub node: Node,
}

/// An edge entry: endpoint node keys plus the edge's attribute map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub source: String,
    pub target: String,

    #[serde(flatten)]
    pub edge: Edge,
}

/// The on-disk artifact for one database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaArtifact {
    /// Database name (file stem of the source SQLite file)
    pub database: String,

    /// RFC 3339 timestamp of the producing run
    pub generated_at: String,

    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
}

impl SchemaArtifact {
    /// Capture a finished graph.
    pub fn from_graph(graph: &SchemaGraph, database: &str, generated_at: &str) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| NodeEntry {
                key: node.key(),
                node: node.clone(),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(source, target, edge)| EdgeEntry {
                source,
                target,
                edge: edge.clone(),
            })
            .collect();

        Self {
            database: database.to_string(),
            generated_at: generated_at.to_string(),
            nodes,
            edges,
        }
    }

    /// Rebuild the in-memory graph from the artifact.
    ///
    /// Fails when an edge references a node key the artifact does not
    /// contain, or when node keys collide.
    pub fn into_graph(self) -> CoreResult<SchemaGraph> {
        let mut graph = SchemaGraph::new();

        for entry in self.nodes {
            graph.insert_node(entry.node)?;
        }

        for entry in self.edges {
            let source = graph
                .index_of(&entry.source)
                .ok_or_else(|| CoreError::DanglingEdge {
                    key: entry.source.clone(),
                })?;
            let target = graph
                .index_of(&entry.target)
                .ok_or_else(|| CoreError::DanglingEdge {
                    key: entry.target.clone(),
                })?;
            graph.insert_edge(source, target, entry.edge);
        }

        Ok(graph)
    }

    /// Atomically write the artifact as pretty JSON.
    pub fn write(&self, path: &Path) -> CoreResult<()> {
        write_json_atomic(path, self)
    }

    /// Read an artifact from disk.
    pub fn read(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Per-run accounting, serialized next to the artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub database: String,
    pub tables: usize,
    pub columns: usize,
    pub foreign_keys: usize,

    /// Columns whose family statistics degraded to the common block
    pub profiler_warnings: usize,

    /// Description files that could not be parsed
    pub metadata_files_skipped: usize,

    /// Columns with no human-authored description
    pub columns_without_description: usize,

    pub duration_ms: u64,
}

impl RunSummary {
    /// Atomically write the summary next to an artifact path, as
    /// `<stem>.summary.json`.
    pub fn write_beside(&self, artifact_path: &Path) -> CoreResult<()> {
        let stem = artifact_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.database.clone());
        let path = artifact_path.with_file_name(format!("{stem}.summary.json"));
        write_json_atomic(&path, self)
    }
}

/// Serialize a value to pretty JSON at `path` via temp-file + rename.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> CoreResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.persist(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "artifact_test.rs"]
mod tests;
