//! Config loading facade: the only entry point callers use.

use super::merge::merge_policy;
use super::sources::{environment, global_file, root_file};
use super::HostConfig;
use crate::error::HostError;
use config::File;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a served root.
    ///
    /// Precedence (lowest to highest): defaults, global file, root file,
    /// environment.
    pub fn load(root: &Path) -> Result<HostConfig, HostError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = root_file::add_to_builder(builder, root)?;
        let builder = environment::add_to_builder(builder);

        let config: HostConfig = builder.build()?.try_deserialize()?;
        debug!(root = %root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from an explicit file, skipping the global and root
    /// files. Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<HostConfig, HostError> {
        if !path.is_file() {
            return Err(HostError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);

        Ok(builder.build()?.try_deserialize()?)
    }
}
