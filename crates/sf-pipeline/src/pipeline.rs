//! The four-phase pipeline from SQLite database to schema graph artifact.
//!
//! Phase 1 creates Table nodes, phase 2 profiles columns and creates Column
//! nodes with their HAS_COLUMN edges, phase 3 resolves and adds FOREIGN_KEY
//! edges, phase 4 finalizes cross-node attributes, validates the invariants
//! and emits the artifact atomically. Each pipeline owns one connection and
//! one graph; nothing is shared and nothing partial is ever persisted.

use crate::error::{PipelineError, PipelineResult};
use sf_core::artifact::{RunSummary, SchemaArtifact};
use sf_core::config::Config;
use sf_core::node::{ColumnNode, PrimaryKey, RelationType, TableNode};
use sf_core::{GraphBuilder, SchemaGraph};
use sf_db::{SqliteSource, TableSchema};
use sf_meta::TableDescriptions;
use sf_profile::Profiler;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One pipeline run: a database file in, an artifact file out.
pub struct SchemaPipeline {
    db_path: PathBuf,
    out_path: PathBuf,
    metadata_dir: Option<PathBuf>,
    config: Config,
}

impl SchemaPipeline {
    pub fn new(db_path: impl Into<PathBuf>, out_path: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            db_path: db_path.into(),
            out_path: out_path.into(),
            metadata_dir: None,
            config,
        }
    }

    /// Override the description directory (defaults to
    /// `<db dir>/<metadata_dir_name>`).
    pub fn with_metadata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.metadata_dir = Some(dir.into());
        self
    }

    /// Run all four phases and emit the artifact.
    pub fn run(&self) -> PipelineResult<RunSummary> {
        let started = Instant::now();
        let database = self
            .db_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "database".to_string());

        log::info!("building schema graph for '{database}'");

        let source = SqliteSource::open(
            &self.db_path,
            Duration::from_millis(self.config.busy_timeout_ms),
        )?;
        let descriptions = self.load_descriptions();
        let profiler = Profiler::new(self.config.profile);

        let mut builder = GraphBuilder::new();
        let mut summary = RunSummary {
            database: database.clone(),
            ..RunSummary::default()
        };

        // Phase 1: tables
        let tables = source.list_tables()?;
        let mut schemas: HashMap<String, TableSchema> = HashMap::new();
        for table in &tables {
            let schema = source.describe_table(table)?;
            let row_count = source.row_count(table)?;
            builder.add_table(TableNode {
                name: table.clone(),
                row_count,
                column_count: schema.columns.len(),
                columns: schema.columns.iter().map(|c| c.name.clone()).collect(),
                primary_key: PrimaryKey::from_columns(schema.primary_key.clone()),
                foreign_key: Vec::new(),
                reference_to: Vec::new(),
                referenced_by: Vec::new(),
            })?;
            schemas.insert(table.clone(), schema);
        }
        summary.tables = tables.len();
        log::info!("phase 1: {} tables", summary.tables);

        // Phase 2: columns and profiles
        for table in &tables {
            let schema = &schemas[table];
            for column in &schema.columns {
                let is_primary_key = column.pk_ordinal.is_some();
                let relation_type = if is_primary_key {
                    RelationType::PrimaryKey
                } else {
                    RelationType::NormalColumn
                };

                let values =
                    source.sample_values(table, &column.name, self.config.profile.hard_cap)?;
                let profile = profiler.profile(
                    &column.declared_type,
                    &column.name,
                    is_primary_key,
                    &values,
                );
                if profile.warning.is_some() {
                    summary.profiler_warnings += 1;
                }

                let description = descriptions.get(table, &column.name).cloned();
                if description.is_none() {
                    summary.columns_without_description += 1;
                }
                let (column_description, value_description) = description
                    .map(|d| (d.column_description, d.value_description))
                    .unwrap_or_default();

                let warning = profile.warning.clone();
                builder.add_column(
                    ColumnNode {
                        name: column.name.clone(),
                        belongs_to: table.clone(),
                        data_type: column.declared_type.to_uppercase(),
                        is_primary_key,
                        is_foreign_key: false,
                        is_nullable: column.is_nullable,
                        stats: profile.into(),
                        column_description,
                        value_description,
                        profiler_warning: warning,
                    },
                    relation_type,
                )?;
                summary.columns += 1;
            }
        }
        summary.metadata_files_skipped = descriptions.files_skipped;
        log::info!("phase 2: {} columns profiled", summary.columns);

        // Phase 3: foreign keys
        for table in &tables {
            for fk in &schemas[table].foreign_keys {
                let to_column = resolve_target_column(table, fk, &schemas)?;
                builder.add_foreign_key_edge(table, &fk.from_column, &fk.to_table, &to_column)?;
                summary.foreign_keys += 1;
            }
        }
        log::info!("phase 3: {} foreign keys", summary.foreign_keys);

        // Phase 4: finalize, validate, emit
        let graph = builder.finalize();
        graph.validate()?;
        self.emit(&graph, &database, &mut summary)?;

        summary.duration_ms = started.elapsed().as_millis() as u64;
        log::info!(
            "phase 4: artifact written to {} in {}ms",
            self.out_path.display(),
            summary.duration_ms
        );
        Ok(summary)
    }

    fn load_descriptions(&self) -> TableDescriptions {
        let dir = match &self.metadata_dir {
            Some(dir) => dir.clone(),
            None => match self.db_path.parent() {
                Some(parent) => parent.join(&self.config.metadata_dir_name),
                None => return TableDescriptions::empty(),
            },
        };
        sf_meta::load_descriptions(&dir)
    }

    fn emit(
        &self,
        graph: &SchemaGraph,
        database: &str,
        summary: &mut RunSummary,
    ) -> PipelineResult<()> {
        let generated_at = chrono::Utc::now().to_rfc3339();
        let artifact = SchemaArtifact::from_graph(graph, database, &generated_at);
        artifact.write(&self.out_path)?;
        summary.write_beside(&self.out_path)?;
        Ok(())
    }
}

/// Resolve the referenced column of one foreign-key pair.
///
/// When the declaration omits the target column, SQLite semantics point at
/// the target's primary key; a composite key resolves by the pair's position
/// in the declaration. A target without a primary key (or missing entirely)
/// cannot be resolved and fails the run.
fn resolve_target_column(
    from_table: &str,
    fk: &sf_db::ForeignKeyInfo,
    schemas: &HashMap<String, TableSchema>,
) -> PipelineResult<String> {
    let unresolvable = |reason: &str| PipelineError::UnresolvableFk {
        from_table: from_table.to_string(),
        from_column: fk.from_column.clone(),
        to_table: fk.to_table.clone(),
        reason: reason.to_string(),
    };

    let target = schemas
        .get(&fk.to_table)
        .ok_or_else(|| unresolvable("target table does not exist"))?;

    match &fk.to_column {
        Some(column) => {
            if !target.columns.iter().any(|c| &c.name == column) {
                return Err(unresolvable("target column does not exist"));
            }
            Ok(column.clone())
        }
        None => target
            .primary_key
            .get(fk.seq)
            .cloned()
            .ok_or_else(|| unresolvable("target table has no primary key")),
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
