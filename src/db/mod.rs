// src/db/mod.rs

//! Package database interface
//!
//! The core never owns package membership data; it reads it live from the
//! package manager's database at run time. [`PackageDatabase`] is the seam:
//! production code uses [`LocalDb`] against the pacman local database on
//! disk, tests substitute an in-memory implementation.

mod local;

pub use local::LocalDb;

use crate::error::{Error, Result};
use regex::Regex;

/// Default pacman database path
pub const DEFAULT_DBPATH: &str = "/var/lib/pacman";

/// Default filesystem root the tracked paths resolve against
pub const DEFAULT_ROOT: &str = "/";

/// One backup entry of a package: a tracked configuration file
///
/// `path` is package-manager-relative (no leading slash, e.g. `etc/sudoers`);
/// `md5` is the content digest pacman recorded when the file was installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub path: String,
    pub md5: String,
}

/// An installed package as far as this tool cares: its identity and its
/// backup entries
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub backup: Vec<BackupEntry>,
}

/// Read access to an installed-package database
pub trait PackageDatabase {
    /// Every installed package, in the database's native enumeration order
    fn packages(&self) -> Result<Vec<Package>>;

    /// Packages matching all of the given regex patterns
    ///
    /// A pattern matches a package when it matches the name or the
    /// description, mirroring `alpm_db_search`.
    fn search(&self, patterns: &[String]) -> Result<Vec<Package>> {
        let regexes = compile_patterns(patterns)?;
        Ok(self
            .packages()?
            .into_iter()
            .filter(|pkg| matches_all(pkg, &regexes))
            .collect())
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| Error::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

fn matches_all(pkg: &Package, regexes: &[Regex]) -> bool {
    regexes.iter().all(|re| {
        re.is_match(&pkg.name)
            || pkg
                .description
                .as_deref()
                .is_some_and(|desc| re.is_match(desc))
    })
}
