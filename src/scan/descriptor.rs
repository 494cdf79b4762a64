//! Build descriptor records emitted by a scan

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Placeholder used when a build directory has no usable name.
pub const UNKNOWN_BUILD_NAME: &str = "Unknown Build";

/// Compression used for a build's WebAssembly payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Compression {
    Brotli,
    Gzip,
    Uncompressed,
    Unknown,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::Brotli => "Brotli",
            Compression::Gzip => "Gzip",
            Compression::Uncompressed => "Uncompressed",
            Compression::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered Unity WebGL build.
///
/// `absolute_path` is unique within the output of a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDescriptor {
    /// Display name, taken from the build directory's own name
    pub name: String,
    /// Scan-root-relative URL path, always starting and ending with `/`
    pub relative_path: String,
    /// Full filesystem path, for diagnostics only
    pub absolute_path: PathBuf,
    /// Recursive byte total of readable files under the build root
    pub size_bytes: u64,
    pub compression: Compression,
}
