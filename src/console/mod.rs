//! Command interpreter for the roster console.
//!
//! This module handles the line-driven command loop:
//! - Registry: command names and help text (registry.rs)
//! - Arguments: same-line argument shapes (args.rs)
//! - Dialog: multi-line record entry (dialog.rs)
//! - Input: line reading and the length limit (input.rs)
//!
//! Scripts run through the same loop, re-entered with prompts suppressed.
//! Nesting is capped at one script inside the outer source, so even a
//! script that runs itself terminates.

pub mod args;
pub mod dialog;
pub mod input;
pub mod registry;

use crate::core::error::ConsoleError;
use crate::core::output;
use crate::core::persist;
use crate::core::record::SpaceMarine;
use crate::core::store::Roster;
use crate::core::time;
use args::{ArgError, ScalarArg, no_args, path_arg};
use dialog::Dialog;
use registry::Command;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Deepest script nesting allowed below the outer input source.
pub const MAX_SCRIPT_DEPTH: usize = 1;

const PROMPT: &str = "> ";

const INSERT: ScalarArg = ScalarArg::new("insert", "key", "key already present");
const UPDATE: ScalarArg = ScalarArg::new("update", "id", "id not found");
const REMOVE_KEY: ScalarArg = ScalarArg::new("remove_key", "key", "key not found");
const REPLACE_IF_LOWER: ScalarArg = ScalarArg::new("replace_if_lower", "key", "key not found");
const REMOVE_LOWER_KEY: ScalarArg = ScalarArg::new("remove_lower_key", "key", "");

/// Whether the loop should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One console session: the roster, where it is saved, and where output goes.
#[derive(Debug)]
pub struct Session<W: Write> {
    roster: Roster,
    save_path: Option<PathBuf>,
    depth: usize,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(roster: Roster, save_path: Option<PathBuf>, out: W) -> Self {
        Self {
            roster,
            save_path,
            depth: 0,
            out,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Current script nesting level; 0 for the outer source.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn prompt(&mut self, quiet: bool) -> io::Result<()> {
        if !quiet {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn say(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }

    /// Run commands from `input` until it is drained or `exit` is read.
    ///
    /// `Flow::Exit` means the whole session should end, including every
    /// enclosing script.
    pub fn interact(&mut self, input: &mut dyn BufRead, quiet: bool) -> Result<Flow, ConsoleError> {
        self.prompt(quiet)?;
        while let Some(line) = input::next_line(input)? {
            if input::is_too_long(&line) {
                self.say(input::TOO_LONG)?;
                self.prompt(quiet)?;
                continue;
            }
            // A blank line dispatches as an empty command name.
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let name = tokens.first().copied().unwrap_or_default();
            let args = tokens.get(1..).unwrap_or_default();
            match self.dispatch(name, args, input, quiet) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(Flow::Exit),
                Err(ConsoleError::InputExhausted) => {
                    self.say(ConsoleError::InputExhausted)?;
                    return Ok(Flow::Continue);
                }
                Err(e) => return Err(e),
            }
            self.prompt(quiet)?;
        }
        Ok(Flow::Continue)
    }

    fn dispatch(
        &mut self,
        name: &str,
        args: &[&str],
        input: &mut dyn BufRead,
        quiet: bool,
    ) -> Result<Flow, ConsoleError> {
        let Some(command) = Command::from_name(name) else {
            self.say("unknown command")?;
            return Ok(Flow::Continue);
        };
        debug!(command = command.name(), depth = self.depth, "dispatch");

        let outcome = match command {
            Command::Help => {
                for line in registry::help_lines() {
                    self.say(line)?;
                }
                Ok(())
            }
            Command::Info => {
                self.info()?;
                Ok(())
            }
            Command::Show => {
                output::write_marines(&mut self.out, self.roster.iter())?;
                Ok(())
            }
            Command::Insert => match INSERT.read::<i64>(args, |k| !self.roster.contains_key(*k)) {
                Ok(key) => {
                    let marine = self.read_marine(input, quiet)?;
                    self.roster.insert(key, marine);
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Update => match UPDATE.read::<i64>(args, |id| self.roster.contains_id(*id)) {
                Ok(id) => {
                    let marine = self.read_marine(input, quiet)?;
                    let replaced = self.roster.update(id, marine);
                    debug!(id, replaced, "updated");
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::RemoveKey => REMOVE_KEY
                .read::<i64>(args, |k| self.roster.contains_key(*k))
                .map(|key| {
                    self.roster.remove_key(key);
                }),
            Command::Clear => {
                self.roster.clear();
                Ok(())
            }
            Command::Save => {
                self.save()?;
                Ok(())
            }
            Command::ExecuteScript => match path_arg(command.name(), "file", args) {
                Ok(path) => return self.execute_script(Path::new(path)),
                Err(e) => Err(e),
            },
            Command::Exit => return Ok(Flow::Exit),
            Command::RemoveLower => match no_args(command.name(), args) {
                Ok(()) => {
                    let marine = self.read_marine(input, quiet)?;
                    let removed = self.roster.remove_lower(marine.health);
                    debug!(removed, "remove_lower");
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::ReplaceIfLower => {
                match REPLACE_IF_LOWER.read::<i64>(args, |k| self.roster.contains_key(*k)) {
                    Ok(key) => {
                        let marine = self.read_marine(input, quiet)?;
                        self.roster.replace_if_lower(key, marine);
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            Command::RemoveLowerKey => REMOVE_LOWER_KEY
                .read::<i64>(args, |_| true)
                .map(|key| {
                    self.roster.remove_lower_key(key);
                }),
            Command::GroupCountingByCreationDate => {
                for (date, count) in self.roster.count_by_creation_date() {
                    writeln!(self.out, "{}: {count}", time::format_date(date))?;
                }
                Ok(())
            }
            Command::FilterGreaterThanCategory => match no_args(command.name(), args) {
                Ok(()) => {
                    let category = Dialog::new(input, &mut self.out, quiet).read_category()?;
                    output::write_marines(
                        &mut self.out,
                        self.roster.greater_than_category(category),
                    )?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::PrintAscending => {
                output::write_marines(&mut self.out, self.roster.ascending_by_health())?;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            self.reject(e)?;
        }
        Ok(Flow::Continue)
    }

    fn reject(&mut self, e: ArgError) -> io::Result<()> {
        self.say(e)
    }

    fn read_marine(
        &mut self,
        input: &mut dyn BufRead,
        quiet: bool,
    ) -> Result<SpaceMarine, ConsoleError> {
        Dialog::new(input, &mut self.out, quiet).read_marine(&mut self.roster)
    }

    fn info(&mut self) -> io::Result<()> {
        self.say("type: BTreeMap<i64, SpaceMarine>")?;
        self.say(format!("number of elements: {}", self.roster.len()))?;
        if let Some(date) = self.roster.newest_creation_date() {
            self.say(format!(
                "newest marine created on {}",
                time::format_date(date)
            ))?;
        }
        Ok(())
    }

    fn save(&mut self) -> io::Result<()> {
        match persist::save(self.save_path.as_deref(), &self.roster) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "save failed");
                self.say(e)
            }
        }
    }

    /// Run `path` as a nested source. The depth counter is restored on every
    /// return path before any error is propagated.
    fn execute_script(&mut self, path: &Path) -> Result<Flow, ConsoleError> {
        if self.depth >= MAX_SCRIPT_DEPTH {
            warn!(path = %path.display(), depth = self.depth, "script nesting limit reached");
            self.say("maximum recursion depth reached, skipping execute_script")?;
            return Ok(Flow::Continue);
        }
        let file = match fs::metadata(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.say("file not found")?;
                return Ok(Flow::Continue);
            }
            Ok(meta) if meta.is_file() => File::open(path),
            Ok(_) => Err(io::Error::from(io::ErrorKind::InvalidInput)),
            Err(e) => Err(e),
        };
        let Ok(file) = file else {
            self.say("file not readable")?;
            return Ok(Flow::Continue);
        };

        self.depth += 1;
        debug!(path = %path.display(), depth = self.depth, "entering script");
        let result = self.interact(&mut BufReader::new(file), true);
        self.depth -= 1;
        debug!(path = %path.display(), depth = self.depth, "left script");

        match result {
            Err(ConsoleError::ReadInput(e)) => {
                warn!(path = %path.display(), error = %e, "script read failed");
                self.say("problem reading script")?;
                Ok(Flow::Continue)
            }
            other => other,
        }
    }
}
