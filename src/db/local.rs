// src/db/local.rs

//! Pacman local database reader
//!
//! The local database is a directory tree: one directory per installed
//! package named `<name>-<version>`, each holding a `desc` file (package
//! metadata in `%SECTION%` blocks) and a `files` file (file lists, including
//! the `%BACKUP%` section this tool is after). Backup lines are
//! `path<TAB>md5`.

use super::{BackupEntry, Package, PackageDatabase};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Package database backed by the pacman local database directory
#[derive(Debug)]
pub struct LocalDb {
    local_dir: PathBuf,
}

impl LocalDb {
    /// Open the local database under `dbpath` (e.g. `/var/lib/pacman`)
    ///
    /// Fails if `<dbpath>/local` is missing or unreadable; a run cannot
    /// proceed without the database.
    pub fn open<P: AsRef<Path>>(dbpath: P) -> Result<Self> {
        let local_dir = dbpath.as_ref().join("local");

        // Probe readability up front so the failure points at the database,
        // not at the first package load.
        let _ = fs::read_dir(&local_dir).map_err(|source| Error::DbInit {
            path: local_dir.clone(),
            source,
        })?;

        debug!("opened local database at {}", local_dir.display());
        Ok(Self { local_dir })
    }

    fn load_package(&self, dir: &Path) -> Result<Package> {
        let desc = parse_sections(&fs::read_to_string(dir.join("desc"))?);

        let name = desc
            .get("NAME")
            .and_then(|lines| lines.first())
            .ok_or_else(|| Error::DbEntry {
                path: dir.to_path_buf(),
                reason: "desc has no %NAME% section".to_string(),
            })?
            .clone();
        let version = desc
            .get("VERSION")
            .and_then(|lines| lines.first())
            .cloned()
            .unwrap_or_default();
        let description = desc.get("DESC").and_then(|lines| lines.first()).cloned();

        let files = parse_sections(&fs::read_to_string(dir.join("files"))?);
        let mut backup = Vec::new();
        for line in files.get("BACKUP").map(Vec::as_slice).unwrap_or_default() {
            match line.split_once('\t') {
                Some((path, md5)) => backup.push(BackupEntry {
                    path: path.to_string(),
                    md5: md5.trim().to_string(),
                }),
                None => {
                    return Err(Error::DbEntry {
                        path: dir.join("files"),
                        reason: format!("malformed %BACKUP% line: {line}"),
                    });
                }
            }
        }

        debug!("loaded {} ({} backup entries)", name, backup.len());
        Ok(Package {
            name,
            version,
            description,
            backup,
        })
    }
}

impl PackageDatabase for LocalDb {
    fn packages(&self) -> Result<Vec<Package>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.local_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                // ALPM_DB_VERSION and friends live next to the entries
                continue;
            }
            if !path.join("desc").is_file() {
                warn!("skipping database entry without desc: {}", path.display());
                continue;
            }
            dirs.push(path);
        }

        // Directory names are <name>-<version>; sorting them reproduces
        // pacman's name-sorted package cache order.
        dirs.sort();

        dirs.iter().map(|dir| self.load_package(dir)).collect()
    }
}

/// Parse a pacman database file into its `%SECTION%` blocks
///
/// A section header is a line of the form `%NAME%`; the section body is every
/// following non-empty line up to the next blank line.
fn parse_sections(content: &str) -> HashMap<String, Vec<String>> {
    let mut sections: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        if line.len() > 2 && line.starts_with('%') && line.ends_with('%') {
            let name = line[1..line.len() - 1].to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
        } else if line.is_empty() {
            current = None;
        } else if let Some(section) = &current {
            sections
                .entry(section.clone())
                .or_default()
                .push(line.to_string());
        }
    }

    sections
}
