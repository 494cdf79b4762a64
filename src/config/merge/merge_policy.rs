//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override these key by key; `scan.ignore` is a list and is
/// replaced wholesale rather than appended to.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "localhost")?
        .set_default("server.port", 8080)?
        .set_default("server.cors", false)?
        .set_default("server.wasm_multithreading", true)?
        .set_default("scan.follow_symlinks", false)?
        .set_default("scan.workers", 0)
}
