//! Path resolution, naming and URL helpers for scans

use crate::scan::descriptor::UNKNOWN_BUILD_NAME;
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Resolve a scan root to an absolute path.
///
/// Uses `dunce` so Windows paths stay in their familiar form. A root that cannot
/// be canonicalized (usually because it does not exist) is made absolute
/// against the current directory instead and left for the walker to reject.
pub fn resolve_root(root: &Path) -> PathBuf {
    match dunce::canonicalize(root) {
        Ok(canonical) => canonical,
        Err(_) if root.is_absolute() => root.to_path_buf(),
        Err(_) => std::env::current_dir()
            .map(|cwd| cwd.join(root))
            .unwrap_or_else(|_| root.to_path_buf()),
    }
}

/// Display name of a build: its own directory name, or the placeholder.
pub fn build_name(build_root: &Path) -> String {
    let name = build_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.is_empty() {
        UNKNOWN_BUILD_NAME.to_string()
    } else {
        name
    }
}

/// Scan-root-relative URL path of `build_root`, always `/`-terminated.
///
/// The scan root itself maps to `/`. Segments are returned unescaped.
pub fn relative_url_path(scan_root: &Path, build_root: &Path) -> String {
    let relative = build_root.strip_prefix(scan_root).unwrap_or(build_root);
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

/// Primary collation key: accents stripped (NFD minus combining marks),
/// lowercased. `Été` keys as `ete`, so it sorts among the `e`s.
pub fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Compare two build names for display order.
///
/// Ties on the collation key fall back to the NFC form, then the raw bytes,
/// so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.nfc().cmp(b.nfc()))
        .then_with(|| a.cmp(b))
}
