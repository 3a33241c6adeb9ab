//! Plain-text rendering of records for console surfaces.

use crate::core::record::SpaceMarine;
use crate::core::time;
use std::io::{self, Write};

const ABSENT: &str = "null";

/// Labeled, one-field-per-line view of a record.
pub fn marine_lines(key: i64, marine: &SpaceMarine) -> Vec<String> {
    let mut lines = vec![
        format!("Key: {key}"),
        format!("ID: {}", marine.id),
        format!("Name: {}", marine.name),
        format!("Coordinates: {}", marine.coordinates),
        format!(
            "Creation date: {}",
            time::format_date(marine.creation_date)
        ),
        format!("Health: {:?}", marine.health),
        format!(
            "Category: {}",
            marine
                .category
                .map_or_else(|| ABSENT.to_string(), |c| c.to_string())
        ),
        format!("Weapon type: {}", marine.weapon_type),
        format!("Melee weapon: {}", marine.melee_weapon),
    ];
    match &marine.chapter {
        None => lines.push(format!("Chapter: {ABSENT}")),
        Some(chapter) => {
            lines.push(format!("Chapter name: {}", chapter.name));
            lines.push(format!(
                "Chapter world: {}",
                chapter.world.as_deref().unwrap_or(ABSENT)
            ));
        }
    }
    lines
}

/// Write each entry followed by a blank separator line.
pub fn write_marines<'a, W, I>(out: &mut W, entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (i64, &'a SpaceMarine)>,
{
    for (key, marine) in entries {
        for line in marine_lines(key, marine) {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
