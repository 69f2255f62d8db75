//! Incremental construction of a schema graph.
//!
//! Nodes are added before their incident edges; cross-node attributes
//! (`reference_to`, `referenced_by`, foreign-key flags) are computed once in
//! [`GraphBuilder::finalize`] from the complete FOREIGN_KEY edge set rather
//! than written incrementally, so re-declared foreign keys cannot produce
//! duplicate entries.

use crate::error::{CoreError, CoreResult};
use crate::graph::SchemaGraph;
use crate::node::{column_key, ColumnNode, Edge, ForeignKeyEdge, Node, RelationType, TableNode};
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashSet;

/// Builds a [`SchemaGraph`] under the structural rules of the artifact.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: SchemaGraph,
    /// Exact foreign-key four-tuples already declared, for idempotency
    declared_fks: HashSet<(String, String, String, String)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table node. Rejects duplicate table names.
    pub fn add_table(&mut self, table: TableNode) -> CoreResult<()> {
        self.graph.insert_node(Node::Table(table))?;
        Ok(())
    }

    /// Add a column node and its HAS_COLUMN edge in one step.
    ///
    /// The owning table must already exist; the column key is
    /// `"{table}.{column}"`.
    pub fn add_column(&mut self, column: ColumnNode, relation_type: RelationType) -> CoreResult<()> {
        let table_idx =
            self.graph
                .index_of(&column.belongs_to)
                .ok_or_else(|| CoreError::UnknownTable {
                    table: column.belongs_to.clone(),
                    column: column.name.clone(),
                })?;

        let column_idx = self.graph.insert_node(Node::Column(column))?;
        self.add_has_column_edge(table_idx, column_idx, relation_type);
        Ok(())
    }

    fn add_has_column_edge(
        &mut self,
        table_idx: petgraph::graph::NodeIndex,
        column_idx: petgraph::graph::NodeIndex,
        relation_type: RelationType,
    ) {
        self.graph
            .insert_edge(table_idx, column_idx, Edge::HasColumn { relation_type });
    }

    /// Add a FOREIGN_KEY edge between two tables.
    ///
    /// Both endpoint tables and both referenced columns must already exist.
    /// Re-declaring the exact same four-tuple is a silent no-op.
    pub fn add_foreign_key_edge(
        &mut self,
        from_table: &str,
        from_column: &str,
        to_table: &str,
        to_column: &str,
    ) -> CoreResult<()> {
        let tuple = (
            from_table.to_string(),
            from_column.to_string(),
            to_table.to_string(),
            to_column.to_string(),
        );
        if self.declared_fks.contains(&tuple) {
            return Ok(());
        }

        let from_idx = self.require_table(from_table, from_column)?;
        let to_idx = self.require_table(to_table, to_column)?;
        self.require_column(from_table, from_column)?;
        self.require_column(to_table, to_column)?;

        let edge = ForeignKeyEdge::new(from_table, from_column, to_table, to_column);
        self.graph.insert_edge(from_idx, to_idx, Edge::ForeignKey(edge));
        self.declared_fks.insert(tuple);
        Ok(())
    }

    fn require_table(
        &self,
        table: &str,
        column: &str,
    ) -> CoreResult<petgraph::graph::NodeIndex> {
        self.graph
            .index_of(table)
            .filter(|&idx| matches!(self.graph.graph_ref()[idx], Node::Table(_)))
            .ok_or_else(|| CoreError::UnknownTable {
                table: table.to_string(),
                column: column.to_string(),
            })
    }

    fn require_column(&self, table: &str, column: &str) -> CoreResult<()> {
        let key = column_key(table, column);
        match self.graph.node(&key) {
            Some(Node::Column(_)) => Ok(()),
            _ => Err(CoreError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            }),
        }
    }

    /// Compute the cross-node attributes from the complete edge set and
    /// return the finished graph.
    ///
    /// Walks every FOREIGN_KEY edge once and (i) rebuilds `reference_to` /
    /// `referenced_by` / `foreign_key` on the endpoint tables, (ii) marks the
    /// participating source columns `is_foreign_key`, (iii) upgrades their
    /// HAS_COLUMN `relation_type`.
    pub fn finalize(mut self) -> SchemaGraph {
        let fks: Vec<ForeignKeyEdge> = self.graph.foreign_key_edges().cloned().collect();

        // Reference lists are rebuilt from scratch, never appended to.
        for node in self.graph.graph_mut().node_weights_mut() {
            if let Node::Table(table) = node {
                table.reference_to.clear();
                table.referenced_by.clear();
                table.foreign_key.clear();
            }
        }

        for fk in &fks {
            if let Some(idx) = self.graph.index_of(&fk.from_table) {
                if let Node::Table(table) = self.graph.node_weight_mut(idx) {
                    table.reference_to.push(fk.reference_path.clone());
                    if !table.foreign_key.contains(&fk.from_column) {
                        table.foreign_key.push(fk.from_column.clone());
                    }
                }
            }
            if let Some(idx) = self.graph.index_of(&fk.to_table) {
                if let Node::Table(table) = self.graph.node_weight_mut(idx) {
                    table.referenced_by.push(fk.reference_path.clone());
                }
            }

            self.mark_foreign_key_column(&fk.from_table, &fk.from_column);
        }

        self.graph
    }

    fn mark_foreign_key_column(&mut self, table: &str, column: &str) {
        let key = column_key(table, column);
        if let Some(idx) = self.graph.index_of(&key) {
            if let Node::Column(col) = self.graph.node_weight_mut(idx) {
                col.is_foreign_key = true;
            }
        }

        // Upgrade the HAS_COLUMN edge of this column.
        let Some(column_idx) = self.graph.index_of(&key) else {
            return;
        };
        let edge_ids: Vec<EdgeIndex> = self
            .graph
            .graph_ref()
            .edges_directed(column_idx, Direction::Incoming)
            .filter(|e| matches!(e.weight(), Edge::HasColumn { .. }))
            .map(|e| e.id())
            .collect();
        for edge_id in edge_ids {
            if let Some(Edge::HasColumn { relation_type }) =
                self.graph.graph_mut().edge_weight_mut(edge_id)
            {
                *relation_type = relation_type.with_foreign_key();
            }
        }
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
