use super::*;
use rusqlite::Connection;
use sf_core::node::Edge;
use tempfile::TempDir;

fn build_db(sql: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shop.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(sql).unwrap();
    drop(conn);
    (dir, path)
}

fn run_pipeline(db_path: &Path) -> (PipelineResult<RunSummary>, PathBuf) {
    let out = db_path.with_file_name("shop.json");
    let pipeline = SchemaPipeline::new(db_path, &out, Config::default());
    (pipeline.run(), out)
}

const TWO_TABLE_DB: &str = "
    CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
    CREATE TABLE orders (
        uid INTEGER,
        ord INTEGER,
        PRIMARY KEY (uid, ord),
        FOREIGN KEY (uid) REFERENCES users(id)
    );
    INSERT INTO users VALUES (1, 'alice'), (2, 'bob'), (3, 'alice');
    INSERT INTO orders VALUES (1, 1), (2, 1);
";

#[test]
fn test_two_table_database_end_to_end() {
    let (_dir, db_path) = build_db(TWO_TABLE_DB);
    let (result, out) = run_pipeline(&db_path);
    let summary = result.unwrap();

    assert_eq!(summary.tables, 2);
    assert_eq!(summary.columns, 4);
    assert_eq!(summary.foreign_keys, 1);

    let graph = SchemaArtifact::read(&out).unwrap().into_graph().unwrap();
    graph.validate().unwrap();
    assert_eq!(graph.node_count(), 6);
    // 4 HAS_COLUMN + 1 FOREIGN_KEY
    assert_eq!(graph.edge_count(), 5);

    let users = graph.node("users").unwrap().as_table().unwrap();
    assert_eq!(users.row_count, 3);
    assert_eq!(users.referenced_by, vec!["orders.uid=users.id"]);

    let orders = graph.node("orders").unwrap().as_table().unwrap();
    assert_eq!(orders.primary_key.columns(), vec!["uid", "ord"]);
    assert_eq!(orders.reference_to, vec!["orders.uid=users.id"]);
    assert_eq!(orders.foreign_key, vec!["uid"]);

    // orders.uid is both primary and foreign key.
    let uid = graph.node("orders.uid").unwrap().as_column().unwrap();
    assert!(uid.is_primary_key);
    assert!(uid.is_foreign_key);
    let uid_relations: Vec<_> = graph
        .edges()
        .filter(|(_, target, _)| target == "orders.uid")
        .filter_map(|(_, _, e)| match e {
            Edge::HasColumn { relation_type } => Some(*relation_type),
            _ => None,
        })
        .collect();
    assert_eq!(uid_relations, vec![RelationType::PrimaryAndForeignKey]);

    // users.name has two distinct values -> categories present and sorted.
    let name = graph.node("users.name").unwrap().as_column().unwrap();
    assert_eq!(
        name.stats.categories,
        Some(vec!["alice".to_string(), "bob".to_string()])
    );

    // users.id is ID-like -> no mode.
    let id = graph.node("users.id").unwrap().as_column().unwrap();
    assert_eq!(id.stats.mode, None);
    assert_eq!(id.stats.range, Some([1.0, 3.0]));
}

#[test]
fn test_fk_with_omitted_target_column_resolves_to_pk() {
    let (_dir, db_path) = build_db(
        "CREATE TABLE parent (id INTEGER PRIMARY KEY);
         CREATE TABLE child (pid INTEGER REFERENCES parent);",
    );
    let (result, out) = run_pipeline(&db_path);
    result.unwrap();

    let graph = SchemaArtifact::read(&out).unwrap().into_graph().unwrap();
    let paths: Vec<&str> = graph
        .foreign_key_edges()
        .map(|fk| fk.reference_path.as_str())
        .collect();
    assert_eq!(paths, vec!["child.pid=parent.id"]);
}

#[test]
fn test_fk_to_pk_less_target_fails_without_artifact() {
    let (_dir, db_path) = build_db(
        "CREATE TABLE parent (id INTEGER);
         CREATE TABLE child (pid INTEGER REFERENCES parent);",
    );
    let (result, out) = run_pipeline(&db_path);

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::UnresolvableFk { .. }
    ));
    assert!(!out.exists(), "no artifact may be written on failure");
}

#[test]
fn test_missing_database_is_source_unavailable() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("ghost.sqlite");
    let (result, out) = run_pipeline(&db_path);

    assert!(matches!(result.unwrap_err(), PipelineError::Db(_)));
    assert!(!out.exists());
}

#[test]
fn test_missing_metadata_is_not_fatal() {
    let (_dir, db_path) = build_db(TWO_TABLE_DB);
    let (result, out) = run_pipeline(&db_path);
    let summary = result.unwrap();

    assert_eq!(summary.metadata_files_skipped, 0);
    assert_eq!(summary.columns_without_description, 4);

    let graph = SchemaArtifact::read(&out).unwrap().into_graph().unwrap();
    assert!(graph.columns().all(|c| c.column_description.is_none()));
}

#[test]
fn test_descriptions_merged_into_columns() {
    let (dir, db_path) = build_db(TWO_TABLE_DB);
    let desc_dir = dir.path().join("database_description");
    std::fs::create_dir(&desc_dir).unwrap();
    std::fs::write(
        desc_dir.join("users.csv"),
        "original_column_name,column_description,value_description\n\
         name,Customer display name,Lowercase first names\n",
    )
    .unwrap();

    let (result, out) = run_pipeline(&db_path);
    let summary = result.unwrap();
    assert_eq!(summary.columns_without_description, 3);

    let graph = SchemaArtifact::read(&out).unwrap().into_graph().unwrap();
    let name = graph.node("users.name").unwrap().as_column().unwrap();
    assert_eq!(
        name.column_description.as_deref(),
        Some("Customer display name")
    );
    assert_eq!(
        name.value_description.as_deref(),
        Some("Lowercase first names")
    );
}

#[test]
fn test_unparseable_temporal_column_degrades_not_fails() {
    let (_dir, db_path) = build_db(
        "CREATE TABLE log (id INTEGER PRIMARY KEY, happened_at DATE);
         INSERT INTO log VALUES (1, 'whenever'), (2, 'sometime');",
    );
    let (result, out) = run_pipeline(&db_path);
    let summary = result.unwrap();
    assert_eq!(summary.profiler_warnings, 1);

    let graph = SchemaArtifact::read(&out).unwrap().into_graph().unwrap();
    let col = graph.node("log.happened_at").unwrap().as_column().unwrap();
    assert!(col.profiler_warning.is_some());
    assert_eq!(col.stats.time_span, None);
    // Common block survives.
    assert_eq!(col.stats.samples.len(), 2);
}

#[test]
fn test_empty_table_profiles_cleanly() {
    let (_dir, db_path) = build_db("CREATE TABLE empty (id INTEGER PRIMARY KEY, note TEXT);");
    let (result, out) = run_pipeline(&db_path);
    let summary = result.unwrap();
    assert_eq!(summary.tables, 1);
    assert_eq!(summary.profiler_warnings, 0);

    let graph = SchemaArtifact::read(&out).unwrap().into_graph().unwrap();
    let table = graph.node("empty").unwrap().as_table().unwrap();
    assert_eq!(table.row_count, 0);

    let id = graph.node("empty.id").unwrap().as_column().unwrap();
    assert_eq!(id.stats.data_integrity, "0%");
    assert_eq!(id.stats.range, None);
}

#[test]
fn test_row_count_reflects_full_table_beyond_cap() {
    let mut inserts = String::from("CREATE TABLE big (v INTEGER);\n");
    inserts.push_str("INSERT INTO big VALUES (1);\n");
    let (_dir, db_path) = build_db(&inserts);

    // Grow past a tiny cap so truncation is observable.
    {
        let conn = Connection::open(&db_path).unwrap();
        for i in 2..=50 {
            conn.execute("INSERT INTO big VALUES (?1)", [i]).unwrap();
        }
    }

    let mut config = Config::default();
    config.profile.hard_cap = 10;
    let out = db_path.with_file_name("big.json");
    let pipeline = SchemaPipeline::new(&db_path, &out, config);
    pipeline.run().unwrap();

    let graph = SchemaArtifact::read(&out).unwrap().into_graph().unwrap();
    let table = graph.node("big").unwrap().as_table().unwrap();
    // Full row count, profiled over the first 10 rows only.
    assert_eq!(table.row_count, 50);
    let v = graph.node("big.v").unwrap().as_column().unwrap();
    assert_eq!(v.stats.range, Some([1.0, 10.0]));
    assert_eq!(v.stats.mean, Some(5.5));
}

#[test]
fn test_summary_written_beside_artifact() {
    let (_dir, db_path) = build_db(TWO_TABLE_DB);
    let (result, out) = run_pipeline(&db_path);
    result.unwrap();

    let summary_path = out.with_file_name("shop.summary.json");
    let content = std::fs::read_to_string(summary_path).unwrap();
    let summary: RunSummary = serde_json::from_str(&content).unwrap();
    assert_eq!(summary.database, "shop");
    assert_eq!(summary.tables, 2);
}

#[test]
fn test_parallel_fks_between_same_tables() {
    let (_dir, db_path) = build_db(
        "CREATE TABLE users (id INTEGER PRIMARY KEY);
         CREATE TABLE messages (
             sender INTEGER REFERENCES users(id),
             receiver INTEGER REFERENCES users(id)
         );",
    );
    let (result, out) = run_pipeline(&db_path);
    result.unwrap();

    let graph = SchemaArtifact::read(&out).unwrap().into_graph().unwrap();
    graph.validate().unwrap();
    let mut paths: Vec<&str> = graph
        .foreign_key_edges()
        .map(|fk| fk.reference_path.as_str())
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        vec!["messages.receiver=users.id", "messages.sender=users.id"]
    );
}
