//! Ignore policy for build discovery.
//!
//! Patterns use gitignore glob syntax: a bare name such as `Library` matches a
//! directory of that name at any depth, while a pattern containing a slash is
//! anchored at the scan root.

use crate::error::HostError;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Version control, dependency caches and Unity editor intermediates.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "bower_components",
    "Library",
    "Temp",
    "Obj",
    "obj",
    "Logs",
    "UserSettings",
];

/// Ordered set of glob patterns excluded from traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    patterns: Vec<String>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_PATTERNS.iter().copied())
    }
}

impl IgnoreSet {
    /// Build a set from explicit patterns. The defaults are not included.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// An ignore set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check every pattern parses as a glob.
    pub fn validate(&self) -> Result<(), HostError> {
        for pattern in &self.patterns {
            if pattern.trim().is_empty() {
                return Err(HostError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: "pattern is empty".to_string(),
                });
            }
            let mut builder = GitignoreBuilder::new("/");
            builder
                .add_line(None, pattern)
                .map_err(|e| HostError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Compile the patterns against a scan root.
    ///
    /// Invalid patterns are logged and dropped so that a bad override never
    /// aborts a scan.
    pub fn compile(&self, root: &Path) -> IgnoreMatcher {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in &self.patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                warn!(pattern = %pattern, error = %e, "Skipping invalid ignore pattern");
            }
        }
        let gitignore = builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to compile ignore patterns, ignoring nothing");
            Gitignore::empty()
        });
        IgnoreMatcher {
            root: root.to_path_buf(),
            gitignore,
        }
    }
}

/// Compiled form of an [`IgnoreSet`], bound to one scan root
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    root: PathBuf,
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    /// Whether `path` should be pruned. The scan root itself is never ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if path == self.root {
            return false;
        }
        self.gitignore.matched(path, is_dir).is_ignore()
    }
}
