//! Line-oriented input shared by the command loop and the record dialog.

use crate::core::error::ConsoleError;
use std::io::BufRead;

/// Longest accepted input line, in characters.
pub const MAX_LINE_CHARS: usize = 256;

pub const TOO_LONG: &str = "input too long";

/// Next line without its terminator, or `None` once the source is drained.
///
/// Bytes that are not valid UTF-8 decode to U+FFFD instead of failing the
/// read, so only real I/O faults surface as `ReadInput`.
pub fn next_line(input: &mut dyn BufRead) -> Result<Option<String>, ConsoleError> {
    let mut raw = Vec::new();
    let read = input
        .read_until(b'\n', &mut raw)
        .map_err(ConsoleError::ReadInput)?;
    if read == 0 {
        return Ok(None);
    }
    let mut line = String::from_utf8_lossy(&raw).into_owned();
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

pub fn is_too_long(line: &str) -> bool {
    line.chars().count() > MAX_LINE_CHARS
}
