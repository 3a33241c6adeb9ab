//! Core modules: the record model, the line codec, file persistence and
//! the roster container. Everything here is independent of the console.

pub mod codec;
pub mod config;
pub mod error;
pub mod output;
pub mod persist;
pub mod record;
pub mod store;
pub mod time;
