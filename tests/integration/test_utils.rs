//! Shared test utilities for integration tests

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that touch process environment variables
static CONFIG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Write a file of exactly `len` bytes, creating parent directories.
pub fn write_sized(path: &Path, len: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0u8; len]).unwrap();
}

/// Create an empty file, creating parent directories.
pub fn touch(path: &Path) {
    write_sized(path, 0);
}

/// Run `f` with `XDG_CONFIG_HOME` pointed at `test_dir` and the given
/// `WEBGL_HOST__*` variables set, restoring the environment afterwards.
pub fn with_config_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();
    let original_vars: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
        .collect();

    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    for (key, value) in original_vars {
        match value {
            Some(v) => std::env::set_var(&key, v),
            None => std::env::remove_var(&key),
        }
    }
    match original_xdg {
        Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    result
}
