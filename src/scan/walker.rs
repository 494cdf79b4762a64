//! Directory walker producing build candidates

use crate::error::SkipReason;
use crate::scan::ignore_set::IgnoreSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A directory that may or may not be a build root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    path: PathBuf,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// Subtrees excluded from traversal
    pub ignore: IgnoreSet,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore: IgnoreSet::default(),
        }
    }
}

/// Lazy, depth-unbounded walk over the directories under a scan root.
///
/// Each step yields either a [`Candidate`] directory or the [`SkipReason`] for
/// a branch that could not be read. Ignored directories are pruned before
/// descent and never yielded. A missing root yields nothing.
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Iterate candidates in depth-first pre-order (parents before children).
    pub fn candidates(&self) -> Candidates {
        if !self.root.is_dir() {
            return Candidates { inner: None };
        }

        let matcher = self.config.ignore.compile(&self.root);
        let inner = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_entry(move |entry| {
                !(entry.file_type().is_dir() && matcher.is_ignored(entry.path(), true))
            });

        Candidates {
            inner: Some(Box::new(inner)),
        }
    }
}

type EntryIter = Box<dyn Iterator<Item = walkdir::Result<walkdir::DirEntry>>>;

/// Iterator returned by [`Walker::candidates`]
pub struct Candidates {
    inner: Option<EntryIter>,
}

impl Iterator for Candidates {
    type Item = Result<Candidate, SkipReason>;

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.as_mut()?;
        loop {
            match inner.next()? {
                Ok(entry) if entry.file_type().is_dir() => {
                    return Some(Ok(Candidate::new(entry.into_path())));
                }
                Ok(_) => continue,
                Err(e) => return Some(Err(SkipReason::from(e))),
            }
        }
    }
}
