//! Node and edge variants of the schema graph.

use crate::checksum::{fk_hash, reference_path};
use crate::stats::StatsRecord;
use serde::{Deserialize, Serialize};

/// Primary-key shape of a table: absent, a single column, or an ordered
/// composite.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryKey {
    #[default]
    None,
    Single(String),
    Composite(Vec<String>),
}

impl PrimaryKey {
    /// Build from an ordered column list.
    pub fn from_columns(mut columns: Vec<String>) -> Self {
        match columns.len() {
            0 => PrimaryKey::None,
            1 => PrimaryKey::Single(columns.remove(0)),
            _ => PrimaryKey::Composite(columns),
        }
    }

    /// Ordered participating columns.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            PrimaryKey::None => Vec::new(),
            PrimaryKey::Single(c) => vec![c.as_str()],
            PrimaryKey::Composite(cs) => cs.iter().map(String::as_str).collect(),
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        match self {
            PrimaryKey::None => false,
            PrimaryKey::Single(c) => c == column,
            PrimaryKey::Composite(cs) => cs.iter().any(|c| c == column),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PrimaryKey::None)
    }
}

/// How a column relates to its owning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    PrimaryKey,
    ForeignKey,
    PrimaryAndForeignKey,
    NormalColumn,
}

impl RelationType {
    /// Fold foreign-key participation into the relation.
    pub fn with_foreign_key(self) -> Self {
        match self {
            RelationType::PrimaryKey | RelationType::PrimaryAndForeignKey => {
                RelationType::PrimaryAndForeignKey
            }
            RelationType::ForeignKey | RelationType::NormalColumn => RelationType::ForeignKey,
        }
    }

    pub fn is_primary(self) -> bool {
        matches!(
            self,
            RelationType::PrimaryKey | RelationType::PrimaryAndForeignKey
        )
    }
}

/// A table node. Keyed by table name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableNode {
    pub name: String,

    /// Actual row count of the source table, not the profiled sample
    pub row_count: u64,

    pub column_count: usize,

    /// Column names in declaration order
    pub columns: Vec<String>,

    #[serde(default, skip_serializing_if = "PrimaryKey::is_empty")]
    pub primary_key: PrimaryKey,

    /// Columns participating in any outgoing foreign key
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_key: Vec<String>,

    /// Reference paths this table emits; rebuilt by finalize
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_to: Vec<String>,

    /// Reference paths targeting this table; rebuilt by finalize
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referenced_by: Vec<String>,
}

/// A column node. Keyed by `"{table}.{column}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnNode {
    pub name: String,

    /// Owning table name
    pub belongs_to: String,

    /// Raw declared type string, uppercased
    pub data_type: String,

    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub is_nullable: bool,

    #[serde(flatten)]
    pub stats: StatsRecord,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_description: Option<String>,

    /// Present when family statistics degraded to the common block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiler_warning: Option<String>,
}

impl ColumnNode {
    /// Graph key of this column.
    pub fn key(&self) -> String {
        column_key(&self.belongs_to, &self.name)
    }
}

/// Key of a column node.
pub fn column_key(table: &str, column: &str) -> String {
    format!("{table}.{column}")
}

/// A node of the schema graph, discriminated by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Table(TableNode),
    Column(ColumnNode),
}

impl Node {
    /// Unique key of the node within the graph.
    pub fn key(&self) -> String {
        match self {
            Node::Table(t) => t.name.clone(),
            Node::Column(c) => c.key(),
        }
    }

    pub fn as_table(&self) -> Option<&TableNode> {
        match self {
            Node::Table(t) => Some(t),
            Node::Column(_) => None,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnNode> {
        match self {
            Node::Column(c) => Some(c),
            Node::Table(_) => None,
        }
    }
}

/// A foreign-key edge between two table nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyEdge {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,

    /// `"from_table.from_column=to_table.to_column"`
    pub reference_path: String,

    /// Stable fingerprint of the four-tuple; disambiguates parallel edges
    pub fk_hash: String,
}

impl ForeignKeyEdge {
    pub fn new(from_table: &str, from_column: &str, to_table: &str, to_column: &str) -> Self {
        Self {
            from_table: from_table.to_string(),
            from_column: from_column.to_string(),
            to_table: to_table.to_string(),
            to_column: to_column.to_string(),
            reference_path: reference_path(from_table, from_column, to_table, to_column),
            fk_hash: fk_hash(from_table, from_column, to_table, to_column),
        }
    }
}

/// An edge of the schema graph, discriminated by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Edge {
    #[serde(rename = "HAS_COLUMN")]
    HasColumn { relation_type: RelationType },

    #[serde(rename = "FOREIGN_KEY")]
    ForeignKey(ForeignKeyEdge),
}
