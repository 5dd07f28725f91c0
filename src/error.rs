// src/error.rs

//! Crate-wide error types
//!
//! Every fatal condition maps to a variant here and propagates with `?` up to
//! `main`, which aborts the run. Per-file recoverable conditions (an
//! unreadable tracked file, pacnew/pacsave/pacorig siblings) are handled where
//! they are detected and never become an `Error`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Pacrat errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open package database at {path}: {source}")]
    DbInit { path: PathBuf, source: io::Error },

    #[error("malformed database entry {path}: {reason}")]
    DbEntry { path: PathBuf, reason: String },

    #[error("invalid target pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("failed to compute hash for {path}: {source}")]
    Hash { path: PathBuf, source: io::Error },

    #[error("{path} exists but is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("{path} is not under the filesystem root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to copy {src} to {dest}: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
