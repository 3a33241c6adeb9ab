//! Same-line argument handling.
//!
//! A command either takes no same-line arguments, or exactly one scalar that
//! is parsed and then checked by a command-specific predicate. Any failure
//! abandons the command before it touches the roster.

use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("{0} required")]
    Missing(&'static str),
    #[error("{0} only takes 1 same-line argument")]
    TooMany(&'static str),
    #[error("invalid {0}")]
    Invalid(&'static str),
    #[error("{0}")]
    Rejected(&'static str),
    #[error("{0} doesn't take any same-line arguments")]
    Unexpected(&'static str),
    #[error("{0} only takes 1 argument")]
    ExtraPaths(&'static str),
}

/// Shape of a command's single same-line argument.
#[derive(Debug, Clone, Copy)]
pub struct ScalarArg {
    pub command: &'static str,
    pub arg: &'static str,
    /// Printed when the predicate rejects a well-formed value.
    pub rejected: &'static str,
}

impl ScalarArg {
    pub const fn new(command: &'static str, arg: &'static str, rejected: &'static str) -> Self {
        Self {
            command,
            arg,
            rejected,
        }
    }

    /// Extract, parse and validate the single argument in `args`.
    pub fn read<T: FromStr>(
        &self,
        args: &[&str],
        is_valid: impl FnOnce(&T) -> bool,
    ) -> Result<T, ArgError> {
        let raw = match args {
            [] => return Err(ArgError::Missing(self.arg)),
            [raw] => *raw,
            _ => return Err(ArgError::TooMany(self.command)),
        };
        let value = raw
            .parse::<T>()
            .map_err(|_| ArgError::Invalid(self.arg))?;
        if is_valid(&value) {
            Ok(value)
        } else {
            Err(ArgError::Rejected(self.rejected))
        }
    }
}

/// Commands whose argument is read on following lines reject same-line ones.
pub fn no_args(command: &'static str, args: &[&str]) -> Result<(), ArgError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ArgError::Unexpected(command))
    }
}

/// A single raw path. Nothing is parsed or checked here; the file itself is
/// probed when it is opened.
pub fn path_arg<'a>(
    command: &'static str,
    arg: &'static str,
    args: &[&'a str],
) -> Result<&'a str, ArgError> {
    match *args {
        [] => Err(ArgError::Missing(arg)),
        [path] => Ok(path),
        _ => Err(ArgError::ExtraPaths(command)),
    }
}
