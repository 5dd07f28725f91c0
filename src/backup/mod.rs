// src/backup/mod.rs

//! Backup discovery, hash comparison, and archival
//!
//! The pipeline: [`BackupClassifier`] walks a package's backup entries and
//! turns the locally modified ones into [`BackupRecord`]s, looking up any
//! previously archived copy along the way ([`snapshot::correlate`]);
//! [`Archiver`] copies a record's system file into the per-package snapshot
//! directory, mirroring directory permissions from the live filesystem.

mod archive;
mod classifier;
pub mod snapshot;

pub use archive::Archiver;
pub use classifier::BackupClassifier;

use std::path::PathBuf;

/// A concrete file with its content digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    pub path: PathBuf,
    pub hash: String,
}

/// One tracked configuration file that qualified for this run
///
/// `system` is the live file (digest computed at classification time);
/// `local` is the previously archived copy, `None` when no archive exists.
/// `recorded_hash` is the digest pacman recorded at install time; it decided
/// inclusion and is kept only for reporting.
#[derive(Debug, Clone)]
pub struct BackupRecord {
    pub package: String,
    pub system: FileSnapshot,
    pub local: Option<FileSnapshot>,
    pub recorded_hash: String,
}

impl BackupRecord {
    /// True when an archived copy exists and no longer matches the system file
    pub fn is_diverged(&self) -> bool {
        self.local
            .as_ref()
            .is_some_and(|local| local.hash != self.system.hash)
    }
}
