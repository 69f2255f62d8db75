//! The finished schema graph and its invariant checks.

use crate::error::{CoreError, CoreResult};
use crate::node::{column_key, ColumnNode, Edge, ForeignKeyEdge, Node, TableNode};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{EdgeRef, IntoNodeReferences};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A directed property graph over Table and Column nodes.
///
/// Node lookup goes through a string-keyed map (table name or
/// `"table.column"`); edges are typed so readers can iterate HAS_COLUMN and
/// FOREIGN_KEY neighborhoods separately.
#[derive(Debug, Default)]
pub struct SchemaGraph {
    graph: DiGraph<Node, Edge>,
    node_map: HashMap<String, NodeIndex>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up a node by its key.
    pub fn node(&self, key: &str) -> Option<&Node> {
        self.node_map.get(key).map(|&idx| &self.graph[idx])
    }

    /// Table nodes in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = &TableNode> {
        self.graph.node_weights().filter_map(Node::as_table)
    }

    /// Column nodes in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnNode> {
        self.graph.node_weights().filter_map(Node::as_column)
    }

    /// Column nodes owned by a table, in HAS_COLUMN edge order.
    pub fn columns_of(&self, table: &str) -> Vec<&ColumnNode> {
        let Some(&idx) = self.node_map.get(table) else {
            return Vec::new();
        };
        let mut out: Vec<(usize, &ColumnNode)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .filter(|e| matches!(e.weight(), Edge::HasColumn { .. }))
            .filter_map(|e| {
                self.graph[e.target()]
                    .as_column()
                    .map(|c| (e.id().index(), c))
            })
            .collect();
        out.sort_by_key(|(edge_idx, _)| *edge_idx);
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// All FOREIGN_KEY edges in insertion order.
    pub fn foreign_key_edges(&self) -> impl Iterator<Item = &ForeignKeyEdge> {
        self.graph.edge_weights().filter_map(|e| match e {
            Edge::ForeignKey(fk) => Some(fk),
            Edge::HasColumn { .. } => None,
        })
    }

    /// All nodes with their keys, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// All edges as `(source_key, target_key, edge)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (String, String, &Edge)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].key(),
                self.graph[e.target()].key(),
                e.weight(),
            )
        })
    }

    pub(crate) fn insert_node(&mut self, node: Node) -> CoreResult<NodeIndex> {
        let key = node.key();
        if self.node_map.contains_key(&key) {
            return Err(CoreError::DuplicateNode { key });
        }
        let idx = self.graph.add_node(node);
        self.node_map.insert(key, idx);
        Ok(idx)
    }

    pub(crate) fn insert_edge(&mut self, source: NodeIndex, target: NodeIndex, edge: Edge) {
        self.graph.add_edge(source, target, edge);
    }

    pub(crate) fn index_of(&self, key: &str) -> Option<NodeIndex> {
        self.node_map.get(key).copied()
    }

    pub(crate) fn node_weight_mut(&mut self, idx: NodeIndex) -> &mut Node {
        &mut self.graph[idx]
    }

    pub(crate) fn graph_mut(&mut self) -> &mut DiGraph<Node, Edge> {
        &mut self.graph
    }

    pub(crate) fn graph_ref(&self) -> &DiGraph<Node, Edge> {
        &self.graph
    }

    /// Check the structural invariants of a finished graph.
    ///
    /// Covers: unique keys (by construction), HAS_COLUMN ownership, foreign-key
    /// endpoint existence, primary/foreign flag consistency, reference-path
    /// bookkeeping, and per-table column counts.
    pub fn validate(&self) -> CoreResult<()> {
        self.validate_columns()?;
        self.validate_foreign_keys()?;
        self.validate_tables()?;
        Ok(())
    }

    fn violation(message: String) -> CoreError {
        CoreError::InvariantViolation { message }
    }

    fn validate_columns(&self) -> CoreResult<()> {
        for (idx, node) in self.graph.node_references() {
            let Some(column) = node.as_column() else {
                continue;
            };

            let incoming: Vec<_> = self
                .graph
                .edges_directed(idx, Direction::Incoming)
                .filter(|e| matches!(e.weight(), Edge::HasColumn { .. }))
                .collect();

            if incoming.len() != 1 {
                return Err(Self::violation(format!(
                    "column '{}' has {} HAS_COLUMN edges, expected exactly 1",
                    column.key(),
                    incoming.len()
                )));
            }

            let Some(owner_table) = self.graph[incoming[0].source()].as_table() else {
                return Err(Self::violation(format!(
                    "column '{}' is owned by a non-table node",
                    column.key()
                )));
            };
            if owner_table.name != column.belongs_to {
                return Err(Self::violation(format!(
                    "column '{}' belongs_to '{}' but is owned by table '{}'",
                    column.key(),
                    column.belongs_to,
                    owner_table.name
                )));
            }
            if column.is_primary_key != owner_table.primary_key.contains(&column.name) {
                return Err(Self::violation(format!(
                    "column '{}' is_primary_key disagrees with table primary_key",
                    column.key()
                )));
            }

            if let Edge::HasColumn { relation_type } = incoming[0].weight() {
                if column.is_primary_key && !relation_type.is_primary() {
                    return Err(Self::violation(format!(
                        "primary-key column '{}' has relation_type {:?}",
                        column.key(),
                        relation_type
                    )));
                }
            }

            let is_fk_by_edges = self.foreign_key_edges().any(|fk| {
                fk.from_table == column.belongs_to && fk.from_column == column.name
            });
            if column.is_foreign_key != is_fk_by_edges {
                return Err(Self::violation(format!(
                    "column '{}' is_foreign_key disagrees with FOREIGN_KEY edges",
                    column.key()
                )));
            }
        }
        Ok(())
    }

    fn validate_foreign_keys(&self) -> CoreResult<()> {
        let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();

        for fk in self.foreign_key_edges() {
            for (table, column) in [
                (&fk.from_table, &fk.from_column),
                (&fk.to_table, &fk.to_column),
            ] {
                if self
                    .node(table)
                    .and_then(Node::as_table)
                    .is_none()
                {
                    return Err(Self::violation(format!(
                        "FOREIGN_KEY '{}' references missing table '{}'",
                        fk.reference_path, table
                    )));
                }
                if self
                    .node(&column_key(table, column))
                    .and_then(Node::as_column)
                    .is_none()
                {
                    return Err(Self::violation(format!(
                        "FOREIGN_KEY '{}' references missing column '{}.{}'",
                        fk.reference_path, table, column
                    )));
                }
            }

            if !seen.insert((&fk.from_table, &fk.to_table, &fk.fk_hash)) {
                return Err(Self::violation(format!(
                    "duplicate fk_hash '{}' between '{}' and '{}'",
                    fk.fk_hash, fk.from_table, fk.to_table
                )));
            }

            let count_in = |list: &[String]| list.iter().filter(|p| *p == &fk.reference_path).count();
            let from = self.node(&fk.from_table).and_then(Node::as_table);
            let to = self.node(&fk.to_table).and_then(Node::as_table);
            if from.map(|t| count_in(&t.reference_to)) != Some(1) {
                return Err(Self::violation(format!(
                    "reference_path '{}' must appear exactly once in '{}'.reference_to",
                    fk.reference_path, fk.from_table
                )));
            }
            if to.map(|t| count_in(&t.referenced_by)) != Some(1) {
                return Err(Self::violation(format!(
                    "reference_path '{}' must appear exactly once in '{}'.referenced_by",
                    fk.reference_path, fk.to_table
                )));
            }
        }
        Ok(())
    }

    fn validate_tables(&self) -> CoreResult<()> {
        for (idx, node) in self.graph.node_references() {
            let Some(table) = node.as_table() else {
                continue;
            };

            let has_column_edges = self
                .graph
                .edges_directed(idx, Direction::Outgoing)
                .filter(|e| matches!(e.weight(), Edge::HasColumn { .. }))
                .count();

            if table.column_count != table.columns.len() || table.column_count != has_column_edges {
                return Err(Self::violation(format!(
                    "table '{}' column_count {} disagrees with columns {} / HAS_COLUMN edges {}",
                    table.name,
                    table.column_count,
                    table.columns.len(),
                    has_column_edges
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
