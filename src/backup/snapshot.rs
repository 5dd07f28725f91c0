// src/backup/snapshot.rs

//! Lookup of previously archived copies
//!
//! The snapshot store is a flat per-package directory under the snapshot
//! root, mirroring each tracked file's original path: package `sudo`'s
//! `/etc/sudoers` lives at `<snapshot_root>/sudo/etc/sudoers`. This module
//! only reads the store; creation is the archiver's job.

use super::FileSnapshot;
use crate::error::Result;
use crate::hash;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Look for an archived copy of `relative_path` under `package`'s snapshot
/// directory
///
/// Returns `None` when no regular file exists at the candidate path. When a
/// copy is found its digest is computed immediately; a hashing failure there
/// is as fatal as anywhere else.
pub fn correlate(
    snapshot_root: &Path,
    package: &str,
    relative_path: &str,
) -> Result<Option<FileSnapshot>> {
    let path = snapshot_root.join(package).join(relative_path);

    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {
            debug!("found local copy: {}", path.display());
            let hash = hash::md5_file(&path)?;
            Ok(Some(FileSnapshot { path, hash }))
        }
        _ => Ok(None),
    }
}
