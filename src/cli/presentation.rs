//! CLI presentation: text and json formatters per command.

use crate::config::HostConfig;
use crate::error::HostError;
use crate::render::{format_size_mb, NO_BUILDS_MESSAGE};
use crate::scan::BuildDescriptor;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

pub fn format_scan_result_text(builds: &[BuildDescriptor]) -> String {
    if builds.is_empty() {
        return NO_BUILDS_MESSAGE.to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Path", "Size", "Compression"]);
    for build in builds {
        table.add_row(vec![
            build.name.clone(),
            build.relative_path.clone(),
            format_size_mb(build.size_bytes),
            build.compression.to_string(),
        ]);
    }
    format!("{}\n{} build(s)", table, builds.len())
}

pub fn format_scan_result_json(builds: &[BuildDescriptor]) -> Result<String, HostError> {
    Ok(serde_json::to_string_pretty(builds)?)
}

pub fn format_config_text(config: &HostConfig) -> String {
    let ignore = config.scan.ignore.join(", ");
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    let rows = [
        ("server.host", config.server.host.clone()),
        ("server.port", config.server.port.to_string()),
        ("server.cors", config.server.cors.to_string()),
        (
            "server.wasm_multithreading",
            config.server.wasm_multithreading.to_string(),
        ),
        ("scan.ignore", ignore),
        ("scan.follow_symlinks", config.scan.follow_symlinks.to_string()),
        ("scan.workers", config.scan.workers.to_string()),
        ("logging.level", config.logging.level.clone()),
        ("logging.format", config.logging.format.clone()),
        ("logging.output", config.logging.output.clone()),
        ("logging.file", log_file),
    ];

    rows.iter()
        .map(|(key, value)| format!("{} = {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_config_json(config: &HostConfig) -> Result<String, HostError> {
    Ok(serde_json::to_string_pretty(config)?)
}
