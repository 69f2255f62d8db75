use super::*;
use crate::node::PrimaryKey;
use crate::stats::StatsRecord;

fn table(name: &str, columns: &[&str], pk: &[&str]) -> TableNode {
    TableNode {
        name: name.to_string(),
        row_count: 0,
        column_count: columns.len(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        primary_key: PrimaryKey::from_columns(pk.iter().map(|c| c.to_string()).collect()),
        foreign_key: Vec::new(),
        reference_to: Vec::new(),
        referenced_by: Vec::new(),
    }
}

fn column(table: &str, name: &str, is_pk: bool) -> ColumnNode {
    ColumnNode {
        name: name.to_string(),
        belongs_to: table.to_string(),
        data_type: "INTEGER".to_string(),
        is_primary_key: is_pk,
        is_foreign_key: false,
        is_nullable: true,
        stats: StatsRecord::default(),
        column_description: None,
        value_description: None,
        profiler_warning: None,
    }
}

fn relation(is_pk: bool) -> RelationType {
    if is_pk {
        RelationType::PrimaryKey
    } else {
        RelationType::NormalColumn
    }
}

fn two_table_builder() -> GraphBuilder {
    let mut builder = GraphBuilder::new();
    builder
        .add_table(table("users", &["id", "name"], &["id"]))
        .unwrap();
    builder
        .add_table(table("orders", &["uid", "ord"], &["uid", "ord"]))
        .unwrap();
    builder.add_column(column("users", "id", true), relation(true)).unwrap();
    builder
        .add_column(column("users", "name", false), relation(false))
        .unwrap();
    builder.add_column(column("orders", "uid", true), relation(true)).unwrap();
    builder.add_column(column("orders", "ord", true), relation(true)).unwrap();
    builder
}

#[test]
fn test_duplicate_table_rejected() {
    let mut builder = GraphBuilder::new();
    builder.add_table(table("users", &[], &[])).unwrap();
    let err = builder.add_table(table("users", &[], &[])).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateNode { key } if key == "users"));
}

#[test]
fn test_column_requires_existing_table() {
    let mut builder = GraphBuilder::new();
    let err = builder
        .add_column(column("ghost", "id", false), relation(false))
        .unwrap_err();
    assert!(matches!(err, CoreError::UnknownTable { .. }));
}

#[test]
fn test_duplicate_column_rejected() {
    let mut builder = GraphBuilder::new();
    builder.add_table(table("users", &["id"], &[])).unwrap();
    builder
        .add_column(column("users", "id", false), relation(false))
        .unwrap();
    let err = builder
        .add_column(column("users", "id", false), relation(false))
        .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateNode { key } if key == "users.id"));
}

#[test]
fn test_foreign_key_requires_endpoints() {
    let mut builder = two_table_builder();
    let err = builder
        .add_foreign_key_edge("orders", "uid", "ghost", "id")
        .unwrap_err();
    assert!(matches!(err, CoreError::UnknownTable { .. }));

    let err = builder
        .add_foreign_key_edge("orders", "missing", "users", "id")
        .unwrap_err();
    assert!(matches!(err, CoreError::UnknownColumn { .. }));
}

#[test]
fn test_foreign_key_redeclaration_is_idempotent() {
    let mut builder = two_table_builder();
    builder
        .add_foreign_key_edge("orders", "uid", "users", "id")
        .unwrap();
    builder
        .add_foreign_key_edge("orders", "uid", "users", "id")
        .unwrap();

    let graph = builder.finalize();
    assert_eq!(graph.foreign_key_edges().count(), 1);

    // Rebuilt, not appended: exactly one reference path on each side.
    let users = graph.node("users").unwrap().as_table().unwrap();
    let orders = graph.node("orders").unwrap().as_table().unwrap();
    assert_eq!(orders.reference_to, vec!["orders.uid=users.id"]);
    assert_eq!(users.referenced_by, vec!["orders.uid=users.id"]);
    graph.validate().unwrap();
}

#[test]
fn test_parallel_edges_with_different_columns_allowed() {
    let mut builder = GraphBuilder::new();
    builder
        .add_table(table("msgs", &["sender", "receiver"], &[]))
        .unwrap();
    builder.add_table(table("users", &["id"], &["id"])).unwrap();
    builder
        .add_column(column("msgs", "sender", false), relation(false))
        .unwrap();
    builder
        .add_column(column("msgs", "receiver", false), relation(false))
        .unwrap();
    builder.add_column(column("users", "id", true), relation(true)).unwrap();

    builder
        .add_foreign_key_edge("msgs", "sender", "users", "id")
        .unwrap();
    builder
        .add_foreign_key_edge("msgs", "receiver", "users", "id")
        .unwrap();

    let graph = builder.finalize();
    let hashes: Vec<&str> = graph
        .foreign_key_edges()
        .map(|fk| fk.fk_hash.as_str())
        .collect();
    assert_eq!(hashes.len(), 2);
    assert_ne!(hashes[0], hashes[1]);
    graph.validate().unwrap();
}

#[test]
fn test_finalize_upgrades_relation_and_flags() {
    let mut builder = two_table_builder();
    builder
        .add_foreign_key_edge("orders", "uid", "users", "id")
        .unwrap();
    let graph = builder.finalize();

    let uid = graph.node("orders.uid").unwrap().as_column().unwrap();
    assert!(uid.is_foreign_key);
    assert!(uid.is_primary_key);

    let relations: Vec<RelationType> = graph
        .edges()
        .filter(|(_, target, _)| target == "orders.uid")
        .filter_map(|(_, _, e)| match e {
            Edge::HasColumn { relation_type } => Some(*relation_type),
            _ => None,
        })
        .collect();
    assert_eq!(relations, vec![RelationType::PrimaryAndForeignKey]);

    let orders = graph.node("orders").unwrap().as_table().unwrap();
    assert_eq!(orders.foreign_key, vec!["uid"]);
    graph.validate().unwrap();
}
