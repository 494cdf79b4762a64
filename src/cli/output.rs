//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::HostError;

/// Map host errors to a string for CLI output.
pub fn map_error(e: &HostError) -> String {
    match e {
        HostError::ConfigError(msg) => format!(
            "Configuration error: {}\nCheck the config file or WEBGL_HOST__* variables.",
            msg
        ),
        other => other.to_string(),
    }
}
