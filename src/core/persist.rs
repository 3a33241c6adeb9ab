//! Loading and saving the roster file.
//!
//! Loading never aborts on a malformed line: each bad line is skipped and
//! reported once, keyed by its 1-based position. Only failing to open or
//! read the file is fatal. An empty line marks the end of the data.

use crate::core::codec::{self, Field};
use crate::core::error::{LineError, LoadError, SaveError};
use crate::core::record::{
    AstartesCategory, Chapter, Coordinates, MeleeWeapon, Named, SpaceMarine, Weapon,
    is_valid_health,
};
use crate::core::store::Roster;
use crate::core::time;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Result of a load: the roster plus every skipped line.
#[derive(Debug, Default)]
pub struct Loaded {
    pub roster: Roster,
    /// `(line number, reason)` in file order.
    pub errors: Vec<(usize, LineError)>,
}

/// Open and load the roster file at `path`.
pub fn load(path: Option<&Path>) -> Result<Loaded, LoadError> {
    let path = path.ok_or(LoadError::PathNotConfigured)?;
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::ReadProblem(e),
    })?;
    let loaded = load_from_reader(BufReader::new(file)).map_err(LoadError::ReadProblem)?;
    info!(
        path = %path.display(),
        records = loaded.roster.len(),
        errors = loaded.errors.len(),
        "loaded roster"
    );
    Ok(loaded)
}

/// Load records from any line source. Errors only on I/O failure.
pub fn load_from_reader<R: BufRead>(mut reader: R) -> io::Result<Loaded> {
    let mut marines = BTreeMap::new();
    let mut errors = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and fail per-line validation.
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches('\n').trim_end_matches('\r');
        if line.is_empty() {
            break;
        }
        line_no += 1;

        match codec::parse_line(line).and_then(|fields| decode_fields(&fields)) {
            Ok((key, marine)) => {
                if marines.insert(key, marine).is_some() {
                    debug!(key, line = line_no, "duplicate key, keeping the later line");
                }
            }
            Err(e) => errors.push((line_no, e)),
        }
    }

    Ok(Loaded {
        roster: Roster::from_entries(marines),
        errors,
    })
}

fn text(field: &Field) -> Option<&str> {
    field.as_deref()
}

fn real(field: &Field) -> Option<f64> {
    text(field)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn named<T: Named>(field: &Field) -> Option<T> {
    T::from_name(text(field)?).ok()
}

/// Validate one parsed line, stopping at the first bad field.
pub fn decode_fields(fields: &[Field]) -> Result<(i64, SpaceMarine), LineError> {
    if fields.len() != codec::FIELD_COUNT {
        return Err(LineError::FieldCount(fields.len()));
    }

    let key = text(&fields[codec::KEY])
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(LineError::InvalidKey)?;
    let id = text(&fields[codec::ID])
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or(LineError::InvalidId)?;
    let name = text(&fields[codec::NAME])
        .filter(|s| !s.is_empty())
        .ok_or(LineError::InvalidName)?;
    let x = real(&fields[codec::X]).ok_or(LineError::InvalidX)?;
    let y = real(&fields[codec::Y]).ok_or(LineError::InvalidY)?;
    let creation_date = text(&fields[codec::CREATION_DATE])
        .and_then(time::parse_date)
        .ok_or(LineError::InvalidDate)?;
    let health = text(&fields[codec::HEALTH])
        .and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|h| is_valid_health(*h))
        .ok_or(LineError::InvalidHealth)?;
    let category = match &fields[codec::CATEGORY] {
        None => None,
        field => Some(named::<AstartesCategory>(field).ok_or(LineError::InvalidCategory)?),
    };
    let weapon_type = named::<Weapon>(&fields[codec::WEAPON_TYPE]).ok_or(LineError::InvalidWeapon)?;
    let melee_weapon =
        named::<MeleeWeapon>(&fields[codec::MELEE_WEAPON]).ok_or(LineError::InvalidMeleeWeapon)?;
    let chapter = fields[codec::CHAPTER_NAME].as_ref().map(|name| Chapter {
        name: name.clone(),
        world: fields[codec::CHAPTER_WORLD].clone(),
    });

    Ok((
        key,
        SpaceMarine {
            id,
            name: name.to_string(),
            coordinates: Coordinates { x, y },
            creation_date,
            health,
            category,
            weapon_type,
            melee_weapon,
            chapter,
        },
    ))
}

/// Write every roster entry to `out`, one line each.
pub fn write_roster<W: Write>(roster: &Roster, out: &mut W) -> io::Result<()> {
    for (key, marine) in roster.iter() {
        writeln!(out, "{}", codec::serialize_record(key, marine))?;
    }
    Ok(())
}

/// Rewrite the roster file with the full current state, creating it if needed.
pub fn save(path: Option<&Path>, roster: &Roster) -> Result<(), SaveError> {
    let path = path.ok_or(SaveError::PathNotConfigured)?;
    if !path.exists() {
        File::create(path).map_err(SaveError::CannotCreate)?;
    }
    if fs::metadata(path)?.permissions().readonly() {
        return Err(SaveError::BadPermissions);
    }
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => SaveError::BadPermissions,
            _ => SaveError::Io(e),
        })?;
    let mut writer = BufWriter::new(file);
    write_roster(roster, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), records = roster.len(), "saved roster");
    Ok(())
}
