//! CLI struct definitions for the astartes console.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "astartes",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactive console for a keyed roster of space marines, saved to a flat quoted file. Commands are read line by line from stdin; type `help` for the list."
)]
pub struct Cli {
    /// Save file holding the roster. Overrides the FILE environment variable.
    #[clap(long, env = "FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,
}
