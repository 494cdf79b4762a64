//! Recursive directory size

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Sum the sizes of all regular files under `root`.
///
/// Unreadable entries contribute 0 and the walk continues, so a partially
/// readable tree yields a partial total and a fully unreadable one yields 0.
/// Symlinks are counted only when `follow_symlinks` is set; otherwise they
/// contribute nothing.
pub fn dir_size(root: &Path, follow_symlinks: bool) -> u64 {
    let mut total: u64 = 0;

    for entry in WalkDir::new(root).follow_links(follow_symlinks) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(root = %root.display(), error = %e, "Skipping unreadable entry in size computation");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total = total.saturating_add(metadata.len()),
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "Failed to read file size");
            }
        }
    }

    total
}
