// src/hash.rs

//! MD5 content hashing for backup entries
//!
//! Pacman records an MD5 digest for every backup entry at install time, so
//! modification detection has to compare against MD5 regardless of how weak
//! the algorithm is for anything security-related. Digests are lowercase hex,
//! matching `alpm_compute_md5sum` output byte for byte.

use crate::error::{Error, Result};
use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the MD5 digest of a byte slice as lowercase hex
pub fn md5_bytes(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}

/// Compute the MD5 digest of a file's contents as lowercase hex
///
/// Streams the file to avoid loading it entirely into memory. Any I/O failure
/// (including the file disappearing between discovery and hashing) is
/// reported as [`Error::Hash`]; callers treat that as fatal to the run, since
/// a missing digest makes every downstream comparison meaningless.
pub fn md5_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|source| Error::Hash {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer).map_err(|source| Error::Hash {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
