//! Runtime configuration.
//!
//! The save file path comes from `--file`, falling back to the `FILE`
//! environment variable (clap resolves both). An empty value counts as
//! unset; the loader turns a missing path into a fatal error.

use crate::cli::Cli;
use std::path::PathBuf;

pub const SAVE_FILE_ENV: &str = "FILE";
pub const LOG_ENV: &str = "ASTARTES_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub save_path: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self::with_save_path(cli.file.clone())
    }

    pub fn with_save_path(save_path: Option<PathBuf>) -> Self {
        Self {
            save_path: save_path.filter(|p| !p.as_os_str().is_empty()),
        }
    }
}
