//! Batch runner: one pipeline per database, on a bounded worker pool.
//!
//! Workers share nothing; each owns its connection, graph and output path.
//! A failure in one database is counted and logged without cancelling the
//! others.

use crate::cli::{BatchArgs, GlobalArgs};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use sf_core::Config;
use sf_pipeline::SchemaPipeline;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// One database scheduled for processing.
struct BatchItem {
    db_name: String,
    db_path: PathBuf,
    out_path: PathBuf,
}

/// Create the progress bar for a batch run.
fn create_progress_bar(count: usize) -> ProgressBar {
    let pb = ProgressBar::new(count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("static progress bar template is valid")
            .progress_chars("#>-"),
    );
    pb
}

/// Scan the dataset root for `<root>/<db_name>/<db_name>.sqlite` entries.
///
/// Directories without a .sqlite file are logged and skipped; when a
/// directory holds several, the lexicographically first wins.
fn scan_databases(args: &BatchArgs) -> Result<Vec<BatchItem>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(&args.root)
        .with_context(|| format!("cannot read dataset root {}", args.root.display()))?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut items = Vec::new();
    for dir in dirs {
        let db_name = match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };

        let mut sqlite_files: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("sqlite"))
                    .unwrap_or(false)
            })
            .collect();
        sqlite_files.sort();

        let Some(db_path) = sqlite_files.into_iter().next() else {
            log::warn!("skipping {db_name}: no .sqlite file found");
            continue;
        };

        let out_path = args.out_root.join(&db_name).join(format!("{db_name}.json"));
        items.push(BatchItem {
            db_name,
            db_path,
            out_path,
        });
    }
    Ok(items)
}

/// Async task body for building one database's artifact.
async fn build_database_task(
    item: BatchItem,
    config: Config,
    semaphore: Arc<Semaphore>,
    success_count: Arc<AtomicUsize>,
    failure_count: Arc<AtomicUsize>,
    progress: Arc<ProgressBar>,
) {
    // Semaphore was closed -- treat as cancellation
    let Ok(_permit) = semaphore.acquire().await else {
        return;
    };

    progress.set_message(item.db_name.clone());

    let db_name = item.db_name;
    let result = tokio::task::spawn_blocking(move || {
        SchemaPipeline::new(&item.db_path, &item.out_path, config).run()
    })
    .await;

    match result {
        Ok(Ok(summary)) => {
            success_count.fetch_add(1, Ordering::SeqCst);
            log::info!(
                "{db_name}: {} tables, {} columns, {} foreign keys [{}ms]",
                summary.tables,
                summary.columns,
                summary.foreign_keys,
                summary.duration_ms
            );
        }
        Ok(Err(e)) => {
            failure_count.fetch_add(1, Ordering::SeqCst);
            log::error!("{db_name}: {e}");
        }
        Err(e) => {
            failure_count.fetch_add(1, Ordering::SeqCst);
            log::error!("{db_name}: worker panicked: {e}");
        }
    }

    progress.inc(1);
}

pub async fn execute(args: &BatchArgs, global: &GlobalArgs) -> Result<()> {
    let config = super::load_config(global)?;
    let workers = args
        .workers
        .or(config.workers)
        .unwrap_or_else(num_cpus::get)
        .max(1);

    let items = scan_databases(args)?;
    println!(
        "  scanning {}: {} database folder(s), {} worker(s)",
        args.root.display(),
        items.len(),
        workers
    );

    let mut skipped = 0usize;
    let pending: Vec<BatchItem> = items
        .into_iter()
        .filter(|item| {
            if args.skip_existing && item.out_path.exists() {
                skipped += 1;
                log::info!("skipping {}: artifact already exists", item.db_name);
                false
            } else {
                true
            }
        })
        .collect();

    let success_count = Arc::new(AtomicUsize::new(0));
    let failure_count = Arc::new(AtomicUsize::new(0));
    let semaphore = Arc::new(Semaphore::new(workers));
    let progress = Arc::new(create_progress_bar(pending.len()));

    let mut set = JoinSet::new();
    for item in pending {
        set.spawn(build_database_task(
            item,
            config.clone(),
            Arc::clone(&semaphore),
            Arc::clone(&success_count),
            Arc::clone(&failure_count),
            Arc::clone(&progress),
        ));
    }

    while let Some(res) = set.join_next().await {
        if let Err(e) = res {
            log::warn!("task join error: {e}");
        }
    }

    progress.finish_with_message("Complete");

    let succeeded = success_count.load(Ordering::SeqCst);
    let failed = failure_count.load(Ordering::SeqCst);
    println!("  \u{2713} {succeeded} succeeded, \u{2717} {failed} failed, {skipped} skipped");

    if failed > 0 {
        anyhow::bail!("{failed} database(s) failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use tempfile::TempDir;

    fn batch_args(root: &std::path::Path, out_root: &std::path::Path) -> BatchArgs {
        BatchArgs {
            root: root.to_path_buf(),
            out_root: out_root.to_path_buf(),
            workers: Some(2),
            skip_existing: false,
        }
    }

    fn global_args() -> GlobalArgs {
        GlobalArgs {
            verbose: false,
            config: None,
        }
    }

    fn make_db(root: &std::path::Path, name: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let conn = Connection::open(dir.join(format!("{name}.sqlite"))).unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT);
             INSERT INTO t VALUES (1, 'a'), (2, 'b');",
        )
        .unwrap();
    }

    #[test]
    fn test_scan_finds_databases_in_order() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        make_db(root.path(), "beta");
        make_db(root.path(), "alpha");
        std::fs::create_dir(root.path().join("no_db_here")).unwrap();

        let items = scan_databases(&batch_args(root.path(), out.path())).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.db_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert!(items[0].out_path.ends_with("alpha/alpha.json"));
    }

    #[tokio::test]
    async fn test_batch_builds_all_databases() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        make_db(root.path(), "one");
        make_db(root.path(), "two");

        execute(&batch_args(root.path(), out.path()), &global_args())
            .await
            .unwrap();

        assert!(out.path().join("one/one.json").exists());
        assert!(out.path().join("two/two.json").exists());
        assert!(out.path().join("one/one.summary.json").exists());
    }

    #[tokio::test]
    async fn test_batch_skip_existing() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        make_db(root.path(), "one");

        let mut args = batch_args(root.path(), out.path());
        execute(&args, &global_args()).await.unwrap();
        let first_mtime = std::fs::metadata(out.path().join("one/one.json"))
            .unwrap()
            .modified()
            .unwrap();

        args.skip_existing = true;
        execute(&args, &global_args()).await.unwrap();
        let second_mtime = std::fs::metadata(out.path().join("one/one.json"))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(first_mtime, second_mtime);
    }

    #[tokio::test]
    async fn test_batch_counts_failures_without_cancelling() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        make_db(root.path(), "good");

        // A directory with a file that is not a SQLite database.
        let bad_dir = root.path().join("bad");
        std::fs::create_dir_all(&bad_dir).unwrap();
        std::fs::write(bad_dir.join("bad.sqlite"), "not a database at all").unwrap();

        let err = execute(&batch_args(root.path(), out.path()), &global_args())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("1 database(s) failed"));

        // The good database still completed.
        assert!(out.path().join("good/good.json").exists());
    }
}
