// src/backup/classifier.rs

//! Classification of a package's backup entries
//!
//! For each tracked file: resolve it under the filesystem root, skip it with
//! a warning when unreadable, surface pacnew/pacsave/pacorig siblings, hash
//! the on-disk content, drop files whose digest still matches the recorded
//! one (unless everything was requested), and correlate the survivors with
//! any previously archived copy.

use super::{snapshot, BackupRecord, FileSnapshot};
use crate::db::Package;
use crate::error::Result;
use crate::hash;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// Merge-artifact suffixes pacman leaves next to config files
const PACFILE_SUFFIXES: [&str; 3] = ["pacnew", "pacsave", "pacorig"];

/// Classifies one package's backup entries into [`BackupRecord`]s
pub struct BackupClassifier<'a> {
    root: &'a Path,
    snapshot_root: &'a Path,
    include_unmodified: bool,
}

impl<'a> BackupClassifier<'a> {
    /// `root` is the live filesystem root tracked paths resolve against;
    /// `snapshot_root` holds the per-package snapshot directories. With
    /// `include_unmodified`, files whose digest still matches the recorded
    /// one are kept instead of filtered.
    pub fn new(root: &'a Path, snapshot_root: &'a Path, include_unmodified: bool) -> Self {
        Self {
            root,
            snapshot_root,
            include_unmodified,
        }
    }

    /// Classify every backup entry of `pkg`, in database order
    ///
    /// Unreadable entries are skipped with a warning. A hashing failure on a
    /// readable file aborts with an error; no partial result is returned.
    pub fn classify(&self, pkg: &Package) -> Result<Vec<BackupRecord>> {
        let mut records = Vec::new();

        for entry in &pkg.backup {
            let path = self.root.join(&entry.path);

            if !readable(&path) {
                warn!("can't access {}", path.display());
                continue;
            }

            for suffix in pacfile_siblings(&path) {
                warn!("{} file detected {}", suffix, path.display());
            }

            let current = hash::md5_file(&path)?;
            if !self.include_unmodified && current == entry.md5 {
                continue;
            }

            debug!("found backup: {}", path.display());

            let local = snapshot::correlate(self.snapshot_root, &pkg.name, &entry.path)?;
            records.push(BackupRecord {
                package: pkg.name.clone(),
                system: FileSnapshot {
                    path,
                    hash: current,
                },
                local,
                recorded_hash: entry.md5.clone(),
            });
        }

        Ok(records)
    }
}

/// Whether `path` can be opened for reading
///
/// A plain `stat` is not enough here: it succeeds on files the process has
/// no read permission for, and an unreadable file must be skipped, not
/// hashed. Opening read-only is the check.
fn readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

/// Which of the pacnew/pacsave/pacorig siblings exist readable next to
/// `path`
fn pacfile_siblings(path: &Path) -> Vec<&'static str> {
    PACFILE_SUFFIXES
        .iter()
        .filter(|suffix| {
            let mut sibling = path.as_os_str().to_os_string();
            sibling.push(".");
            sibling.push(suffix);
            readable(Path::new(&sibling))
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::BackupEntry;
    use std::fs;

    fn package(name: &str, backup: Vec<BackupEntry>) -> Package {
        Package {
            name: name.to_string(),
            version: "1.0-1".to_string(),
            description: None,
            backup,
        }
    }

    fn entry(path: &str, content: &[u8]) -> BackupEntry {
        BackupEntry {
            path: path.to_string(),
            md5: hash::md5_bytes(content),
        }
    }

    #[test]
    fn test_unmodified_file_is_filtered() {
        // Scenario A: on-disk content matches the recorded digest
        let root = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/sudoers"), b"original").unwrap();

        let pkg = package("sudo", vec![entry("etc/sudoers", b"original")]);
        let classifier = BackupClassifier::new(root.path(), store.path(), false);

        assert!(classifier.classify(&pkg).unwrap().is_empty());
    }

    #[test]
    fn test_unmodified_file_kept_with_include_unmodified() {
        let root = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/sudoers"), b"original").unwrap();

        let pkg = package("sudo", vec![entry("etc/sudoers", b"original")]);
        let classifier = BackupClassifier::new(root.path(), store.path(), true);

        let records = classifier.classify(&pkg).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].local.is_none());
    }

    #[test]
    fn test_modified_file_produces_record() {
        // Scenario B: on-disk digest differs from the recorded one
        let root = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/sudoers"), b"edited").unwrap();

        let pkg = package("sudo", vec![entry("etc/sudoers", b"original")]);
        let classifier = BackupClassifier::new(root.path(), store.path(), false);

        let records = classifier.classify(&pkg).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.package, "sudo");
        assert_eq!(record.system.path, root.path().join("etc/sudoers"));
        assert_eq!(record.system.hash, hash::md5_bytes(b"edited"));
        assert_eq!(record.recorded_hash, hash::md5_bytes(b"original"));
        assert!(record.local.is_none());
        assert!(!record.is_diverged());
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();

        let pkg = package("sudo", vec![entry("etc/sudoers", b"original")]);
        let classifier = BackupClassifier::new(root.path(), store.path(), true);

        assert!(classifier.classify(&pkg).unwrap().is_empty());
    }

    #[test]
    fn test_local_copy_is_correlated() {
        let root = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/sudoers"), b"edited").unwrap();
        fs::create_dir_all(store.path().join("sudo/etc")).unwrap();
        fs::write(store.path().join("sudo/etc/sudoers"), b"older edit").unwrap();

        let pkg = package("sudo", vec![entry("etc/sudoers", b"original")]);
        let classifier = BackupClassifier::new(root.path(), store.path(), false);

        let records = classifier.classify(&pkg).unwrap();
        let local = records[0].local.as_ref().unwrap();
        assert_eq!(local.hash, hash::md5_bytes(b"older edit"));
        assert!(records[0].is_diverged());
    }

    #[test]
    fn test_pacnew_sibling_does_not_affect_inclusion() {
        // Scenario D: the pacnew warning fires but the unchanged file stays
        // excluded
        let root = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/foo.conf"), b"stock").unwrap();
        fs::write(root.path().join("etc/foo.conf.pacnew"), b"incoming").unwrap();

        let pkg = package("foo", vec![entry("etc/foo.conf", b"stock")]);
        let classifier = BackupClassifier::new(root.path(), store.path(), false);

        assert!(classifier.classify(&pkg).unwrap().is_empty());
    }

    #[test]
    fn test_readable_probe() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("present.conf");
        fs::write(&file, b"x").unwrap();

        assert!(readable(&file));
        assert!(!readable(&root.path().join("absent.conf")));
    }

    #[test]
    fn test_pacfile_siblings_detection() {
        let root = tempfile::tempdir().unwrap();
        let conf = root.path().join("foo.conf");
        fs::write(&conf, b"x").unwrap();
        fs::write(root.path().join("foo.conf.pacnew"), b"x").unwrap();
        fs::write(root.path().join("foo.conf.pacorig"), b"x").unwrap();

        assert_eq!(pacfile_siblings(&conf), vec!["pacnew", "pacorig"]);
        assert!(pacfile_siblings(&root.path().join("other.conf")).is_empty());
    }
}
