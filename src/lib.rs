// src/lib.rs

//! Pacrat
//!
//! Keeps track of pacman "backup" files: configuration files the package
//! manager will not silently overwrite on upgrade. Pacrat finds the ones that
//! have been locally modified, compares them against a previously taken
//! snapshot, and archives fresh copies into per-package snapshot directories.
//!
//! # Architecture
//!
//! - `db`: read-only view of the pacman local database (trait seam, so tests
//!   run against in-memory databases)
//! - `backup`: classification, snapshot correlation, and archival
//! - `hash`: MD5 digests matching the ones pacman records
//! - `cli` / `commands` / `output`: run configuration and the console surface

pub mod backup;
pub mod cli;
pub mod commands;
pub mod db;
mod error;
pub mod hash;
pub mod output;

pub use backup::{Archiver, BackupClassifier, BackupRecord, FileSnapshot};
pub use db::{BackupEntry, LocalDb, Package, PackageDatabase};
pub use error::{Error, Result};
