//! Multi-line record entry.
//!
//! Each field is prompted on its own line and re-asked until it validates;
//! a record is never returned half-filled. Prompts are suppressed in quiet
//! (script) mode, error messages are not.

use crate::console::input::{self, TOO_LONG};
use crate::core::error::ConsoleError;
use crate::core::record::{
    AstartesCategory, Chapter, Coordinates, MeleeWeapon, Named, SpaceMarine, Weapon,
    is_valid_health,
};
use crate::core::store::Roster;
use crate::core::time;
use std::io::{BufRead, Write};

const PRECISION_NOTE: &str =
    "Note: all decimal fractions are stored with limited precision and may be rounded from the value given";

type Check<T> = Result<T, &'static str>;

/// Free text must survive the quoted line format.
fn persistable_text(value: &str) -> Check<String> {
    if value.contains(['"', ',']) {
        Err("text can't contain quotes or commas")
    } else {
        Ok(value.to_string())
    }
}

fn non_empty_text(value: &str, empty_message: &'static str) -> Check<String> {
    if value.is_empty() {
        Err(empty_message)
    } else {
        persistable_text(value)
    }
}

fn coordinate(value: &str) -> Check<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or("not a valid coordinate")
}

fn health(value: &str) -> Check<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|h| is_valid_health(*h))
        .ok_or("not a valid health value")
}

fn yes_no(value: &str) -> Check<bool> {
    match value {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err("enter 'y' or 'n'"),
    }
}

fn variant<T: Named>(value: &str, message: &'static str) -> Check<T> {
    T::from_name(value).map_err(|_| message)
}

pub struct Dialog<'a> {
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
    quiet: bool,
}

impl<'a> Dialog<'a> {
    pub fn new(input: &'a mut dyn BufRead, out: &'a mut dyn Write, quiet: bool) -> Self {
        Self { input, out, quiet }
    }

    fn prompt_loop<T>(
        &mut self,
        prompt: &str,
        optional: bool,
        check: impl Fn(&str) -> Check<T>,
    ) -> Result<Option<T>, ConsoleError> {
        loop {
            if !self.quiet {
                write!(self.out, "{prompt}")?;
                self.out.flush()?;
            }
            let line = input::next_line(self.input)?.ok_or(ConsoleError::InputExhausted)?;
            if input::is_too_long(&line) {
                writeln!(self.out, "{TOO_LONG}")?;
                continue;
            }
            if optional && line.is_empty() {
                return Ok(None);
            }
            match check(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => writeln!(self.out, "{message}")?,
            }
        }
    }

    /// Ask until a valid value is entered.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        check: impl Fn(&str) -> Check<T>,
    ) -> Result<T, ConsoleError> {
        self.prompt_loop(prompt, false, check)?
            .ok_or(ConsoleError::InputExhausted)
    }

    /// Like [`Dialog::ask`], but an empty line means "absent".
    pub fn ask_optional<T>(
        &mut self,
        prompt: &str,
        check: impl Fn(&str) -> Check<T>,
    ) -> Result<Option<T>, ConsoleError> {
        self.prompt_loop(prompt, true, check)
    }

    pub fn read_category(&mut self) -> Result<AstartesCategory, ConsoleError> {
        self.ask(
            &format!("Enter category (one of [{}]): ", AstartesCategory::choices()),
            |s| variant(s, "invalid category"),
        )
    }

    /// Read a whole marine. The id is drawn from `roster` only once every
    /// field is valid; the creation date is today.
    pub fn read_marine(&mut self, roster: &mut Roster) -> Result<SpaceMarine, ConsoleError> {
        if !self.quiet {
            writeln!(self.out, "{PRECISION_NOTE}")?;
        }
        let name = self.ask("Enter name: ", |s| non_empty_text(s, "name can't be empty"))?;
        let x = self.ask("Enter x coordinate (decimal fraction): ", coordinate)?;
        let y = self.ask("Enter y coordinate (decimal fraction): ", coordinate)?;
        let health = self.ask("Enter health (decimal fraction, must be >0): ", health)?;
        let category = self.ask_optional(
            &format!(
                "Enter a category (one of [{}]) or leave empty: ",
                AstartesCategory::choices()
            ),
            |s| variant(s, "not a valid category"),
        )?;
        let weapon_type = self.ask(
            &format!("Enter a weapon type (one of [{}]): ", Weapon::choices()),
            |s| variant(s, "not a valid weapon type"),
        )?;
        let melee_weapon = self.ask(
            &format!("Enter a melee weapon type (one of [{}]): ", MeleeWeapon::choices()),
            |s| variant(s, "not a valid melee weapon type"),
        )?;

        let chapter = if self.ask("Do you want to add a chapter (y/n): ", yes_no)? {
            let name = self.ask("Enter chapter name: ", |s| {
                non_empty_text(s, "chapter name can't be empty")
            })?;
            let world = self.ask_optional("Enter world name or leave empty: ", persistable_text)?;
            Some(Chapter { name, world })
        } else {
            None
        };

        Ok(SpaceMarine {
            id: roster.draw_id(),
            name,
            coordinates: Coordinates { x, y },
            creation_date: time::today(),
            health,
            category,
            weapon_type,
            melee_weapon,
            chapter,
        })
    }
}
