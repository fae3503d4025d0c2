//! Disk-usage guard for the store root.
//!
//! Long fuzz campaigns grow the store without bound. Before opening, a
//! run measures the root's on-disk footprint and wipes the whole tree
//! when it exceeds the configured budget; the open step recreates a
//! fresh store.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

/// Fixed base cost charged per directory, on top of the sizes of its
/// entries.
pub const DIR_BASE_BYTES: u64 = 4096;

/// Returns the byte footprint of a path.
///
/// A regular file is sized by its metadata. A directory costs
/// [`DIR_BASE_BYTES`] plus the recursive sum over its entries. Symlinks
/// are sized by their own metadata and never followed, so a symlinked
/// directory cycle cannot recurse. A missing path or unreadable
/// directory counts as 0; the caller is never failed over it.
pub fn usage(path: &Path) -> u64 {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) => {
            warn!("Cannot stat {}: {}", path.display(), err);
            return 0;
        }
    };

    if !meta.is_dir() {
        return meta.len();
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Cannot read directory {}: {}", path.display(), err);
            return 0;
        }
    };

    let mut total = DIR_BASE_BYTES;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {}", path.display(), err);
                continue;
            }
        };

        // file_type() does not follow symlinks, so a link to a directory
        // falls into the metadata branch below.
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => total += usage(&entry.path()),
            Ok(_) => match entry.metadata() {
                Ok(meta) => total += meta.len(),
                Err(err) => warn!("Cannot stat {}: {}", entry.path().display(), err),
            },
            Err(err) => warn!("Cannot type {}: {}", entry.path().display(), err),
        }
    }

    total
}

/// Deletes the tree at `path` if its usage exceeds `limit` bytes.
///
/// Returns whether the tree was removed. A missing path is a no-op.
pub fn reset_if_oversized(path: &Path, limit: u64) -> io::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let used = usage(path);
    if used <= limit {
        return Ok(false);
    }

    info!(
        "Store root {} uses {} bytes (limit {}), removing it",
        path.display(),
        used,
        limit
    );
    fs::remove_dir_all(path)?;
    Ok(true)
}
