//! Descriptor builder: dedup, naming, size and compression for accepted roots

use crate::scan::compression::detect_compression;
use crate::scan::descriptor::BuildDescriptor;
use crate::scan::detector::BuildRoot;
use crate::scan::path::{build_name, compare_names, relative_url_path};
use crate::scan::processed::ProcessedSet;
use crate::scan::size::dir_size;
use parking_lot::Mutex;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Turns detected build roots into sorted [`BuildDescriptor`]s for one scan
pub struct DescriptorBuilder {
    scan_root: PathBuf,
    follow_symlinks: bool,
    processed: ProcessedSet,
}

impl DescriptorBuilder {
    pub fn new(scan_root: PathBuf, follow_symlinks: bool) -> Self {
        Self {
            scan_root,
            follow_symlinks,
            processed: ProcessedSet::new(),
        }
    }

    /// Claim a detected root. False means it duplicates an accepted root or
    /// sits inside one.
    pub fn accept(&self, root: &BuildRoot) -> bool {
        let accepted = self.processed.claim(&root.path);
        if !accepted {
            trace!(root = %root.path.display(), "Build root already processed, skipping");
        }
        accepted
    }

    /// Compute the descriptor for one accepted root.
    pub fn describe(&self, root: &BuildRoot) -> BuildDescriptor {
        let size_bytes = dir_size(&root.path, self.follow_symlinks);
        let compression = detect_compression(&root.path, self.follow_symlinks);
        let descriptor = BuildDescriptor {
            name: build_name(&root.path),
            relative_path: relative_url_path(&self.scan_root, &root.path),
            absolute_path: root.path.clone(),
            size_bytes,
            compression,
        };
        debug!(
            name = %descriptor.name,
            path = %descriptor.relative_path,
            size_bytes,
            compression = %compression,
            marker = ?root.marker,
            "Described build"
        );
        descriptor
    }

    /// Describe every accepted root and return them in display order.
    ///
    /// Size computation is spread across up to `workers` scoped threads.
    pub fn build_all(&self, roots: Vec<BuildRoot>, workers: usize) -> Vec<BuildDescriptor> {
        let workers = workers.max(1).min(roots.len().max(1));

        let mut descriptors = if workers == 1 {
            roots.iter().map(|root| self.describe(root)).collect()
        } else {
            let out = Mutex::new(Vec::with_capacity(roots.len()));
            let chunk_size = roots.len().div_ceil(workers);
            std::thread::scope(|s| {
                for chunk in roots.chunks(chunk_size) {
                    let out = &out;
                    s.spawn(move || {
                        for root in chunk {
                            let descriptor = self.describe(root);
                            out.lock().push(descriptor);
                        }
                    });
                }
            });
            out.into_inner()
        };

        sort_descriptors(&mut descriptors);
        descriptors
    }
}

/// Sort ascending by name, then by path so the order never depends on
/// traversal order.
pub fn sort_descriptors(descriptors: &mut [BuildDescriptor]) {
    descriptors.sort_by(|a, b| {
        compare_names(&a.name, &b.name).then_with(|| a.absolute_path.cmp(&b.absolute_path))
    });
}
