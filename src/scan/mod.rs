//! Unity WebGL build discovery.
//!
//! A scan walks the scan root (pruning the ignore set), asks the detector set
//! whether each directory is a build root, deduplicates nested and repeated
//! roots, then measures and classifies each accepted build. Every failure
//! along the way degrades to "fewer builds": a scan never returns an error.

pub mod builder;
pub mod compression;
pub mod descriptor;
pub mod detector;
pub mod ignore_set;
pub mod path;
pub mod processed;
pub mod size;
pub mod walker;

pub use builder::DescriptorBuilder;
pub use descriptor::{BuildDescriptor, Compression, UNKNOWN_BUILD_NAME};
pub use detector::{BuildRoot, Detector, DetectorSet, Marker};
pub use ignore_set::{IgnoreSet, DEFAULT_IGNORE_PATTERNS};
pub use processed::ProcessedSet;
pub use walker::{Candidate, Walker, WalkerConfig};

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Options for a single scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub ignore: IgnoreSet,
    /// Follow symlinks both while walking and while sizing builds
    pub follow_symlinks: bool,
    /// Threads used for size computation (0 = available parallelism)
    pub workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore: IgnoreSet::default(),
            follow_symlinks: false,
            workers: 0,
        }
    }
}

impl ScanOptions {
    fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Build discovery over one set of options and detectors
pub struct Scanner {
    options: ScanOptions,
    detectors: DetectorSet,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        let detectors = DetectorSet::standard(options.follow_symlinks);
        Self { options, detectors }
    }

    pub fn with_detectors(mut self, detectors: DetectorSet) -> Self {
        self.detectors = detectors;
        self
    }

    /// Discover builds under `root`, sorted by name.
    ///
    /// A missing or unlistable root yields an empty list.
    #[instrument(skip(self, root), fields(root = %root.display()))]
    pub fn scan(&self, root: &Path) -> Vec<BuildDescriptor> {
        let start = Instant::now();
        let scan_root = path::resolve_root(root);

        if !scan_root.is_dir() {
            info!(root = %scan_root.display(), "Scan root is not a directory, no builds");
            return Vec::new();
        }

        let walker = Walker::with_config(
            scan_root.clone(),
            WalkerConfig {
                follow_symlinks: self.options.follow_symlinks,
                ignore: self.options.ignore.clone(),
            },
        );
        let builder = DescriptorBuilder::new(scan_root, self.options.follow_symlinks);

        let mut accepted = Vec::new();
        let mut candidates = 0usize;
        let mut skipped = 0usize;

        for step in walker.candidates() {
            match step {
                Ok(candidate) => {
                    candidates += 1;
                    if let Some(build_root) = self.detectors.detect(&candidate) {
                        if builder.accept(&build_root) {
                            accepted.push(build_root);
                        }
                    }
                }
                Err(reason) => {
                    skipped += 1;
                    debug!(%reason, "Skipping unreadable branch");
                }
            }
        }

        let descriptors = builder.build_all(accepted, self.options.effective_workers());

        info!(
            builds = descriptors.len(),
            candidates,
            skipped,
            duration_ms = start.elapsed().as_millis() as u64,
            "Scan complete"
        );
        descriptors
    }
}

/// Discover builds under `root` with the default detectors.
pub fn scan_builds(root: &Path, options: &ScanOptions) -> Vec<BuildDescriptor> {
    Scanner::new(options.clone()).scan(root)
}
