//! Error types for the WebGL build host.
//!
//! The scan core never fails outward: every problem it meets becomes a
//! [`SkipReason`] that is logged and dropped. [`HostError`] is reserved for the
//! surfaces around it (configuration, CLI, server startup).

use std::path::PathBuf;
use thiserror::Error;

/// Why a single traversal step produced no candidate.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("Failed to walk {path:?}: {source}")]
    Walk {
        path: Option<PathBuf>,
        #[source]
        source: walkdir::Error,
    },

    #[error("Symlink loop at {0:?}")]
    SymlinkLoop(PathBuf),
}

impl From<walkdir::Error> for SkipReason {
    fn from(err: walkdir::Error) -> Self {
        if let Some(ancestor) = err.loop_ancestor() {
            return SkipReason::SymlinkLoop(ancestor.to_path_buf());
        }
        SkipReason::Walk {
            path: err.path().map(|p| p.to_path_buf()),
            source: err,
        }
    }
}

/// Errors surfaced by configuration, CLI and server plumbing.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for HostError {
    fn from(err: config::ConfigError) -> Self {
        HostError::ConfigError(err.to_string())
    }
}
