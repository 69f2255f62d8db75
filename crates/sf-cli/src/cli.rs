//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Schemaflow - build schema graph artifacts from SQLite databases
#[derive(Parser, Debug)]
#[command(name = "sf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path (defaults to ./schemaflow.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the schema graph artifact for one database
    Build(BuildArgs),

    /// Build artifacts for every database under a dataset root
    Batch(BatchArgs),

    /// Print the schema stored in an artifact
    Schema(SchemaArgs),

    /// List harmonized question/SQL records from a benchmark dataset
    Questions(QuestionsArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the SQLite database file
    #[arg(long)]
    pub db: PathBuf,

    /// Output path for the artifact JSON
    #[arg(long)]
    pub out: PathBuf,

    /// Description directory (defaults to database_description/ next to the db)
    #[arg(long)]
    pub metadata_dir: Option<PathBuf>,
}

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Dataset root containing one directory per database
    #[arg(long)]
    pub root: PathBuf,

    /// Root directory for the emitted artifacts
    #[arg(long)]
    pub out_root: PathBuf,

    /// Worker count (defaults to the CPU count)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Skip databases whose artifact already exists
    #[arg(long)]
    pub skip_existing: bool,
}

/// Arguments for the schema command
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Path to an artifact JSON file
    #[arg(long)]
    pub artifact: PathBuf,

    /// Also print foreign-key reference paths
    #[arg(long)]
    pub fks: bool,
}

/// Arguments for the questions command
#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// Dataset tag: spider, spider_dev, bird or bird_dev
    #[arg(long)]
    pub dataset: String,

    /// Dataset JSON file(s); spider accepts train and train-others
    #[arg(long, required = true, num_args = 1..)]
    pub json: Vec<PathBuf>,

    /// Keep only records for this database id
    #[arg(long)]
    pub db_id: Option<String>,

    /// Print distinct database ids instead of records
    #[arg(long)]
    pub ids: bool,

    /// Maximum records printed
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
