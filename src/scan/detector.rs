//! Build root detection strategies.
//!
//! Traversal only hands out directories; deciding whether a directory is a
//! Unity WebGL build is the job of a [`Detector`]. New export layouts are
//! supported by adding a detector to the [`DetectorSet`].

use crate::scan::walker::Candidate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// File written by Unity next to `index.html` when PWA output is enabled.
pub const SERVICE_WORKER_FILE: &str = "ServiceWorker.js";
/// Template asset directory copied into every WebGL export.
pub const TEMPLATE_DATA_DIR: &str = "TemplateData";
/// Directory holding the loader, framework, data and wasm files.
pub const BUILD_DIR: &str = "Build";

/// Which signal identified a build root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    ServiceWorker,
    TemplateData,
}

/// A directory accepted as a build root by a detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRoot {
    pub path: PathBuf,
    pub marker: Marker,
}

/// Strategy that recognizes one build layout
pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;

    fn detect(&self, candidate: &Candidate) -> Option<BuildRoot>;
}

/// A directory containing `ServiceWorker.js` is a build root.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceWorkerDetector;

impl Detector for ServiceWorkerDetector {
    fn name(&self) -> &'static str {
        "service-worker"
    }

    fn detect(&self, candidate: &Candidate) -> Option<BuildRoot> {
        let dir = candidate.path();
        if dir.join(SERVICE_WORKER_FILE).is_file() {
            return Some(BuildRoot {
                path: dir.to_path_buf(),
                marker: Marker::ServiceWorker,
            });
        }
        None
    }
}

/// A directory containing `TemplateData/` and a `Build/` directory with at
/// least one `*.wasm*` file is a build root.
///
/// `TemplateData/` on its own is a copied template, not a build.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateDataDetector {
    /// Count symlinked wasm files, matching the walker's setting
    pub follow_symlinks: bool,
}

impl TemplateDataDetector {
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

impl Detector for TemplateDataDetector {
    fn name(&self) -> &'static str {
        "template-data"
    }

    fn detect(&self, candidate: &Candidate) -> Option<BuildRoot> {
        let dir = candidate.path();
        if !dir.join(TEMPLATE_DATA_DIR).is_dir() {
            return None;
        }
        if !has_wasm_file(&dir.join(BUILD_DIR), self.follow_symlinks) {
            trace!(dir = %dir.display(), "TemplateData without wasm output, rejecting");
            return None;
        }
        Some(BuildRoot {
            path: dir.to_path_buf(),
            marker: Marker::TemplateData,
        })
    }
}

/// Whether `build_dir` directly contains a file whose name matches `*.wasm*`.
fn has_wasm_file(build_dir: &Path, follow_symlinks: bool) -> bool {
    let Ok(entries) = fs::read_dir(build_dir) else {
        return false;
    };
    entries.filter_map(Result::ok).any(|entry| {
        is_regular_file(&entry, follow_symlinks)
            && entry.file_name().to_string_lossy().contains(".wasm")
    })
}

/// Whether a directory entry is a regular file, resolving symlinks only when
/// `follow_symlinks` is set.
pub(crate) fn is_regular_file(entry: &fs::DirEntry, follow_symlinks: bool) -> bool {
    if follow_symlinks {
        entry.path().is_file()
    } else {
        entry.file_type().map(|t| t.is_file()).unwrap_or(false)
    }
}

/// Ordered detectors; the first one to accept a candidate wins
pub struct DetectorSet {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for DetectorSet {
    fn default() -> Self {
        Self::standard(false)
    }
}

impl DetectorSet {
    /// Both built-in layouts, service worker first.
    pub fn standard(follow_symlinks: bool) -> Self {
        Self::new()
            .with(ServiceWorkerDetector)
            .with(TemplateDataDetector::new(follow_symlinks))
    }

    /// An empty set that accepts nothing.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    pub fn with(mut self, detector: impl Detector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn detect(&self, candidate: &Candidate) -> Option<BuildRoot> {
        self.detectors.iter().find_map(|d| {
            let root = d.detect(candidate)?;
            trace!(detector = d.name(), root = %root.path.display(), "Build root detected");
            Some(root)
        })
    }
}
