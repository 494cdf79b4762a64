//! Configuration System
//!
//! Layered configuration for the build host: built-in defaults, the user's
//! global config file, a `webgl-host.toml` in the served root, then
//! `WEBGL_HOST__*` environment variables. CLI flags are applied last by the
//! binary.

use crate::headers::HeaderPolicy;
use crate::logging::LoggingConfig;
use crate::scan::{IgnoreSet, ScanOptions, DEFAULT_IGNORE_PATTERNS};
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::root_file::ROOT_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Build discovery settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Send `Access-Control-Allow-Origin: *`
    #[serde(default)]
    pub cors: bool,

    /// Send cross-origin isolation headers for threaded WebAssembly builds
    #[serde(default = "default_true")]
    pub wasm_multithreading: bool,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: false,
            wasm_multithreading: default_true(),
        }
    }
}

impl ServerConfig {
    pub fn header_policy(&self) -> HeaderPolicy {
        HeaderPolicy {
            wasm_multithreading: self.wasm_multithreading,
            cors: self.cors,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Port must be between 1 and 65535".to_string());
        }
        Ok(())
    }
}

/// Build discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Glob patterns pruned from traversal; replaces the defaults when set
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// Size computation threads (0 = available parallelism)
    #[serde(default)]
    pub workers: usize,
}

fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            follow_symlinks: false,
            workers: 0,
        }
    }
}

impl ScanConfig {
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions {
            ignore: IgnoreSet::new(self.ignore.iter().cloned()),
            follow_symlinks: self.follow_symlinks,
            workers: self.workers,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        IgnoreSet::new(self.ignore.iter().cloned())
            .validate()
            .map_err(|e| e.to_string())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Server(String),
    Scan(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Server(msg) => write!(f, "Server: {}", msg),
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl HostConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.server.validate() {
            errors.push(ValidationError::Server(e));
        }
        if let Err(e) = self.scan.validate() {
            errors.push(ValidationError::Scan(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
