//! WebAssembly payload compression classification

use crate::scan::descriptor::Compression;
use crate::scan::detector::{is_regular_file, BUILD_DIR};
use std::fs;
use std::path::Path;

/// Suffixes in server preference order.
const SUFFIX_PRIORITY: [(&str, Compression); 3] = [
    (".wasm.br", Compression::Brotli),
    (".wasm.gz", Compression::Gzip),
    (".wasm", Compression::Uncompressed),
];

/// Classify the files directly inside `<build_root>/Build/`.
///
/// Only one level is inspected. A missing or unreadable `Build/` directory, or
/// one with no wasm payload, is `Unknown`. Symlinked payloads count only when
/// `follow_symlinks` is set.
pub fn detect_compression(build_root: &Path, follow_symlinks: bool) -> Compression {
    let Ok(entries) = fs::read_dir(build_root.join(BUILD_DIR)) else {
        return Compression::Unknown;
    };

    let names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| is_regular_file(entry, follow_symlinks))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    classify(names.iter().map(String::as_str))
}

/// Pick the highest-priority compression among file names.
pub fn classify<'a>(names: impl IntoIterator<Item = &'a str>) -> Compression {
    let names: Vec<&str> = names.into_iter().collect();
    SUFFIX_PRIORITY
        .iter()
        .find(|(suffix, _)| names.iter().any(|name| name.ends_with(suffix)))
        .map(|(_, compression)| *compression)
        .unwrap_or(Compression::Unknown)
}
