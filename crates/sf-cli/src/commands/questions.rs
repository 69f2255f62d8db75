//! List harmonized NL-SQL records from a benchmark dataset.

use crate::cli::QuestionsArgs;
use anyhow::Result;
use sf_datasets::{Dataset, DatasetPaths};

/// Map explicit JSON paths onto the loader's per-dataset slots.
fn paths_for(dataset: Dataset, json: &[std::path::PathBuf]) -> DatasetPaths {
    let mut paths = DatasetPaths::default();
    match dataset {
        Dataset::Spider => {
            paths.spider_train = json.first().cloned();
            paths.spider_train_other = json.get(1).cloned();
        }
        Dataset::SpiderDev => paths.spider_dev = json.first().cloned(),
        Dataset::Bird => paths.bird_train = json.first().cloned(),
        Dataset::BirdDev => paths.bird_dev = json.first().cloned(),
    }
    paths
}

pub fn execute(args: &QuestionsArgs) -> Result<()> {
    let dataset: Dataset = args.dataset.parse()?;
    let paths = paths_for(dataset, &args.json);

    if args.ids {
        for id in sf_datasets::db_ids(dataset, &paths)? {
            println!("{id}");
        }
        return Ok(());
    }

    let records = match &args.db_id {
        Some(db_id) => sf_datasets::load_for_db(dataset, &paths, db_id)?,
        None => sf_datasets::load(dataset, &paths)?,
    };

    println!("[{dataset}] {} record(s)", records.len());
    for record in records.iter().take(args.limit) {
        println!("  [{}] {}", record.db_id, record.question);
        println!("      {}", record.sql_query);
        if let Some(evidence) = &record.evidence {
            println!("      evidence: {evidence}");
        }
    }
    if records.len() > args.limit {
        println!("  ... and {} more", records.len() - args.limit);
    }

    Ok(())
}
