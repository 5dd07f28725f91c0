// src/backup/archive.rs

//! Archival of classified files into the snapshot store
//!
//! The destination for a record is `<snapshot_root>/<package>/<system path>`.
//! Intermediate directories are created on demand with the permission bits of
//! the corresponding directory under the live filesystem root, so the
//! snapshot tree mirrors the system tree. The package-name level has no
//! source counterpart and is created with mode `0o777` (subject to the
//! process umask, as with plain mkdir).

use super::BackupRecord;
use crate::error::{Error, Result};
use std::fs::{self, DirBuilder};
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
use std::path::Path;
use tracing::debug;

/// Copies classified files into per-package snapshot directories
pub struct Archiver<'a> {
    root: &'a Path,
    snapshot_root: &'a Path,
}

impl<'a> Archiver<'a> {
    pub fn new(root: &'a Path, snapshot_root: &'a Path) -> Self {
        Self {
            root,
            snapshot_root,
        }
    }

    /// Archive `record`'s system file, overwriting any previous snapshot
    ///
    /// Creates exactly the missing prefix of the destination path. Fails when
    /// a destination component exists but is not a directory, or when the
    /// copy itself fails; both abort the run.
    pub fn archive(&self, record: &BackupRecord) -> Result<()> {
        let src = &record.system.path;
        let rel = src
            .strip_prefix(self.root)
            .map_err(|_| Error::OutsideRoot {
                path: src.clone(),
                root: self.root.to_path_buf(),
            })?;
        let file_name = rel.file_name().ok_or_else(|| Error::OutsideRoot {
            path: src.clone(),
            root: self.root.to_path_buf(),
        })?;

        // Package-name level first; it has no source directory to mirror.
        let mut dest_dir = self.snapshot_root.join(&record.package);
        ensure_dir(&dest_dir, 0o777)?;

        let mut src_dir = self.root.to_path_buf();
        if let Some(parent) = rel.parent() {
            for component in parent.components() {
                src_dir.push(component);
                dest_dir.push(component);
                let meta = fs::metadata(&src_dir)?;
                ensure_dir(&dest_dir, meta.permissions().mode() & 0o7777)?;
            }
        }

        let dest = dest_dir.join(file_name);
        // fs::copy truncates an existing destination and carries over the
        // source's permission bits, which is exactly the overwrite-in-place
        // snapshot semantics.
        fs::copy(src, &dest).map_err(|source| Error::Copy {
            src: src.clone(),
            dest: dest.clone(),
            source,
        })?;

        debug!("archived {} -> {}", src.display(), dest.display());
        Ok(())
    }
}

/// Create `path` as a directory with `mode` unless it already exists
///
/// An existing directory is left untouched, mode included. An existing
/// non-directory is an error.
fn ensure_dir(path: &Path, mode: u32) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(_) => DirBuilder::new()
            .mode(mode)
            .create(path)
            .map_err(|source| Error::CreateDir {
                path: path.to_path_buf(),
                source,
            }),
    }
}
