//! Line codec for the persisted roster file.
//!
//! One record per line, twelve positional fields separated by commas with
//! optional surrounding whitespace. Each field is either the bare token
//! `null` or a double-quoted value:
//!
//! ```text
//! "1", "7", "Titus", "1.5", "-3", "07-03-24", "90", null, "BOLTGUN", "CHAIN_SWORD", "Ultramarines", null
//! ```

use crate::core::error::LineError;
use crate::core::record::{Named, SpaceMarine};
use crate::core::time;
use regex::Regex;
use std::sync::LazyLock;

pub const FIELD_COUNT: usize = 12;

pub const KEY: usize = 0;
pub const ID: usize = 1;
pub const NAME: usize = 2;
pub const X: usize = 3;
pub const Y: usize = 4;
pub const CREATION_DATE: usize = 5;
pub const HEALTH: usize = 6;
pub const CATEGORY: usize = 7;
pub const WEAPON_TYPE: usize = 8;
pub const MELEE_WEAPON: usize = 9;
pub const CHAPTER_NAME: usize = 10;
pub const CHAPTER_WORLD: usize = 11;

const NULL_TOKEN: &str = "null";
const SEPARATOR: &str = ", ";

static FIELD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*,[ \t]*").unwrap());

/// One decoded field; `None` stands for the bare `null` token.
pub type Field = Option<String>;

/// Split a persisted line into its fields.
///
/// Quoting is checked across the whole line before the field count, so a
/// line with both problems reports bad quoting.
pub fn parse_line(line: &str) -> Result<Vec<Field>, LineError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let tokens: Vec<&str> = FIELD_SEPARATOR.split(line).collect();

    if tokens
        .iter()
        .any(|token| token.starts_with('"') != token.ends_with('"'))
    {
        return Err(LineError::BadQuoting);
    }

    if tokens.len() != FIELD_COUNT {
        return Err(LineError::FieldCount(tokens.len()));
    }

    Ok(tokens.into_iter().map(unquote).collect())
}

fn unquote(token: &str) -> Field {
    if token == NULL_TOKEN {
        return None;
    }
    let token = token.strip_prefix('"').unwrap_or(token);
    let token = token.strip_suffix('"').unwrap_or(token);
    Some(token.to_string())
}

/// Wrap a value in quotes, or emit the bare `null` token when absent.
pub fn quoted<T: ToString>(value: Option<T>) -> String {
    match value {
        Some(v) => format!("\"{}\"", v.to_string()),
        None => NULL_TOKEN.to_string(),
    }
}

/// Render `marine` under `key` as one persisted line, without a newline.
pub fn serialize_record(key: i64, marine: &SpaceMarine) -> String {
    let chapter_name = marine.chapter.as_ref().map(|c| c.name.as_str());
    let chapter_world = marine
        .chapter
        .as_ref()
        .and_then(|c| c.world.as_deref());

    [
        quoted(Some(key)),
        quoted(Some(marine.id)),
        quoted(Some(&marine.name)),
        quoted(Some(marine.coordinates.x)),
        quoted(Some(marine.coordinates.y)),
        quoted(Some(time::format_date(marine.creation_date))),
        quoted(Some(marine.health)),
        quoted(marine.category.map(|c| c.name())),
        quoted(Some(marine.weapon_type.name())),
        quoted(Some(marine.melee_weapon.name())),
        quoted(chapter_name),
        quoted(chapter_world),
    ]
    .join(SEPARATOR)
}
