//! Build one schema graph artifact.

use crate::cli::{BuildArgs, GlobalArgs};
use anyhow::Result;
use sf_pipeline::SchemaPipeline;

pub fn execute(args: &BuildArgs, global: &GlobalArgs) -> Result<()> {
    let config = super::load_config(global)?;

    let mut pipeline = SchemaPipeline::new(&args.db, &args.out, config);
    if let Some(dir) = &args.metadata_dir {
        pipeline = pipeline.with_metadata_dir(dir);
    }

    let summary = pipeline.run()?;

    println!(
        "  \u{2713} {} - {} tables, {} columns, {} foreign keys [{}ms]",
        summary.database, summary.tables, summary.columns, summary.foreign_keys, summary.duration_ms
    );
    if summary.profiler_warnings > 0 {
        println!(
            "    {} column(s) degraded to common statistics",
            summary.profiler_warnings
        );
    }

    Ok(())
}
