//! Print the schema stored in an artifact.

use crate::cli::SchemaArgs;
use anyhow::Result;
use sf_core::SchemaArtifact;

pub fn execute(args: &SchemaArgs) -> Result<()> {
    let artifact = SchemaArtifact::read(&args.artifact)?;
    let database = artifact.database.clone();
    let graph = artifact.into_graph()?;

    println!("database: {database}");
    for table in graph.tables() {
        println!(
            "  {} ({} rows): {}",
            table.name,
            table.row_count,
            table.columns.join(", ")
        );
    }

    if args.fks {
        println!("foreign keys:");
        for fk in graph.foreign_key_edges() {
            println!("  {}", fk.reference_path);
        }
    }

    Ok(())
}
