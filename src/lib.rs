//! Astartes: an interactive console over a keyed roster of space marines.
//!
//! The roster lives in memory as a map from a user-chosen integer key to a
//! record. It is loaded once at startup from a flat file of quoted,
//! comma-separated lines and written back in full by the `save` command.
//!
//! # Architecture
//!
//! - [`core`]: record model, line codec, loader/saver, roster container
//! - [`console`]: line-driven command interpreter with nested scripts
//!
//! # Error tiers
//!
//! - **Fatal**: the save path is unset, the file is missing, or it cannot be
//!   read. Startup stops before the console runs.
//! - **Recoverable**: malformed file lines, bad command arguments and bad
//!   record fields are reported and skipped; the session continues.
//!
//! # Examples
//!
//! ```bash
//! # Start a session on an existing roster
//! FILE=roster.csv astartes
//!
//! # Drive it from a script instead of a terminal
//! astartes --file roster.csv < commands.txt
//! ```

pub mod cli;
pub mod console;
pub mod core;

use crate::cli::Cli;
use crate::console::Session;
use crate::core::config::{Config, DEFAULT_LOG_FILTER, LOG_ENV};
use crate::core::error::{ConsoleError, LineError};
use crate::core::persist;
use clap::Parser;
use colored::Colorize;
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so they never interleave with console output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// Render per-line load errors, sorted by line number.
pub fn load_error_lines(errors: &[(usize, LineError)]) -> Vec<String> {
    let mut sorted: Vec<_> = errors.iter().collect();
    sorted.sort_by_key(|(line, _)| *line);
    sorted
        .into_iter()
        .map(|(line, e)| format!("line {line}: {e}"))
        .collect()
}

pub fn run() -> Result<(), ConsoleError> {
    let cli = Cli::parse();
    init_tracing();
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = Config::from_cli(&cli);
    let loaded = persist::load(config.save_path.as_deref())?;
    if !loaded.errors.is_empty() {
        println!("{}", "Errors reading file:".bright_yellow());
        for line in load_error_lines(&loaded.errors) {
            println!("{line}");
        }
    }

    let stdin = io::stdin();
    let quiet = !stdin.is_terminal();
    let mut session = Session::new(loaded.roster, config.save_path, io::stdout().lock());
    session.interact(&mut stdin.lock(), quiet)?;
    Ok(())
}
