//! Root-local config file source: `<root>/webgl-host.toml`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// File name looked up in the served root.
pub const ROOT_CONFIG_FILE: &str = "webgl-host.toml";

/// Add the root-local config file to builder if present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = root.join(ROOT_CONFIG_FILE);
    if path.is_file() {
        return Ok(builder.add_source(File::from(path).required(false)));
    }
    Ok(builder)
}
