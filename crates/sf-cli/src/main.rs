//! Schemaflow CLI - builds schema graph artifacts from SQLite databases

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{batch, build, questions, schema};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        cli::Commands::Build(args) => build::execute(args, &cli.global),
        cli::Commands::Batch(args) => batch::execute(args, &cli.global).await,
        cli::Commands::Schema(args) => schema::execute(args),
        cli::Commands::Questions(args) => questions::execute(args),
    }
}
