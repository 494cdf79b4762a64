//! Scan-scoped set of accepted build roots

use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Build roots already turned into descriptors during one scan.
///
/// Roots are keyed by their canonical directory, so a symlinked alias of an
/// accepted build (or of a directory inside one) is rejected. Membership check
/// and insert happen under one lock, so concurrent discovery of the same root
/// claims it exactly once.
#[derive(Debug, Default)]
pub struct ProcessedSet {
    roots: Mutex<HashSet<PathBuf>>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `root` for this scan.
    ///
    /// Returns false if `root` or one of its ancestors was claimed before.
    /// Paths that cannot be canonicalized are keyed as given.
    pub fn claim(&self, root: &Path) -> bool {
        let key = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let mut roots = self.roots.lock();
        if key.ancestors().any(|p| roots.contains(p)) {
            return false;
        }
        roots.insert(key)
    }
}
