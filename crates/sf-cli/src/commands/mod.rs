//! Command implementations for the sf CLI

pub mod batch;
pub mod build;
pub mod questions;
pub mod schema;

use crate::cli::GlobalArgs;
use anyhow::Result;
use sf_core::Config;

/// Load the effective configuration for a command.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_dir(std::path::Path::new("."))?,
    };
    Ok(config)
}
