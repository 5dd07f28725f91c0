// src/commands.rs

//! Operation implementations
//!
//! Both operations share the same front half: open the database, enumerate
//! the target packages, classify their backup entries. They differ only in
//! what happens to the resulting records.

use crate::backup::{Archiver, BackupClassifier, BackupRecord};
use crate::cli::RunConfig;
use crate::db::{LocalDb, PackageDatabase};
use crate::output::{self, ColorScheme};
use anyhow::Result;
use tracing::debug;

/// `pacrat list`: print every record's status
pub fn cmd_list(cfg: &RunConfig) -> Result<()> {
    let db = LocalDb::open(&cfg.dbpath)?;
    let colors = ColorScheme::new(cfg.color);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for record in collect_backups(&db, cfg)? {
        output::print_status(&mut out, &record, &colors)?;
    }

    Ok(())
}

/// `pacrat pull`: archive every record into the snapshot store
pub fn cmd_pull(cfg: &RunConfig) -> Result<()> {
    let db = LocalDb::open(&cfg.dbpath)?;
    let archiver = Archiver::new(&cfg.root, &cfg.snapshot_dir);

    for record in collect_backups(&db, cfg)? {
        archiver.archive(&record)?;
    }

    Ok(())
}

/// Classify the backup entries of every target package, in package
/// enumeration order
fn collect_backups(
    db: &dyn PackageDatabase,
    cfg: &RunConfig,
) -> crate::Result<Vec<BackupRecord>> {
    let packages = if cfg.targets.is_empty() {
        db.packages()?
    } else {
        db.search(&cfg.targets)?
    };
    debug!("classifying {} packages", packages.len());

    let classifier = BackupClassifier::new(&cfg.root, &cfg.snapshot_dir, cfg.include_unmodified);

    let mut records = Vec::new();
    for pkg in &packages {
        records.extend(classifier.classify(pkg)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Operation;
    use crate::db::{BackupEntry, Package};
    use crate::hash;
    use crate::output::ColorWhen;
    use std::fs;
    use std::path::Path;

    struct FakeDb(Vec<Package>);

    impl PackageDatabase for FakeDb {
        fn packages(&self) -> crate::Result<Vec<Package>> {
            Ok(self.0.clone())
        }
    }

    fn config(root: &Path, snapshot_dir: &Path, include_unmodified: bool) -> RunConfig {
        RunConfig {
            operation: Operation::List,
            include_unmodified,
            root: root.to_path_buf(),
            dbpath: "/var/lib/pacman".into(),
            snapshot_dir: snapshot_dir.to_path_buf(),
            targets: Vec::new(),
            color: ColorWhen::Never,
        }
    }

    fn tracked(root: &Path, rel: &str, installed: &[u8], on_disk: &[u8]) -> BackupEntry {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, on_disk).unwrap();
        BackupEntry {
            path: rel.to_string(),
            md5: hash::md5_bytes(installed),
        }
    }

    #[test]
    fn test_collect_spans_packages_in_order() {
        let root = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        let db = FakeDb(vec![
            Package {
                name: "bash".to_string(),
                version: "5.2-1".to_string(),
                description: None,
                backup: vec![tracked(root.path(), "etc/bash.bashrc", b"stock", b"edited")],
            },
            Package {
                name: "sudo".to_string(),
                version: "1.9-1".to_string(),
                description: None,
                backup: vec![tracked(root.path(), "etc/sudoers", b"stock", b"edited too")],
            },
        ]);

        let cfg = config(root.path(), store.path(), false);
        let records = collect_backups(&db, &cfg).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].package, "bash");
        assert_eq!(records[1].package, "sudo");
    }

    #[test]
    fn test_collect_filters_unmodified() {
        let root = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        let db = FakeDb(vec![Package {
            name: "sudo".to_string(),
            version: "1.9-1".to_string(),
            description: None,
            backup: vec![
                tracked(root.path(), "etc/sudoers", b"same", b"same"),
                tracked(root.path(), "etc/sudo.conf", b"stock", b"edited"),
            ],
        }]);

        let cfg = config(root.path(), store.path(), false);
        let records = collect_backups(&db, &cfg).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].system.path.ends_with("etc/sudo.conf"));
    }
}
