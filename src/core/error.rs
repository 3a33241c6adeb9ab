use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that stop startup before the console runs.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("the FILE env variable that should point to a save file is not set")]
    PathNotConfigured,
    #[error("file not found")]
    NotFound(PathBuf),
    #[error("problem reading file")]
    ReadProblem(#[source] io::Error),
}

/// Reason a single persisted line was skipped during load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("bad quoting")]
    BadQuoting,
    #[error("only {0}fields")]
    FieldCount(usize),
    #[error("invalid key")]
    InvalidKey,
    #[error("invalid id")]
    InvalidId,
    #[error("invalid name")]
    InvalidName,
    #[error("invalid x coordinate")]
    InvalidX,
    #[error("invalid y coordinate")]
    InvalidY,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid health")]
    InvalidHealth,
    #[error("invalid category")]
    InvalidCategory,
    #[error("invalid weapon type")]
    InvalidWeapon,
    #[error("invalid melee weapon type")]
    InvalidMeleeWeapon,
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("save file path is not configured")]
    PathNotConfigured,
    #[error("can't create file")]
    CannotCreate(#[source] io::Error),
    #[error("bad permissions")]
    BadPermissions,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Literal did not name any variant of the enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {literal}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub literal: String,
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("problem reading input")]
    ReadInput(#[source] io::Error),
    #[error("input ended in the middle of a record")]
    InputExhausted,
}
