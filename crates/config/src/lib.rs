//! Configuration file discovery for mailsearch
//!
//! Config files live in `~/.config/mailsearch/` unless the
//! `MAILSEARCH_CONFIG_DIR` environment variable points somewhere else.
//! Every file is optional; callers decide what a missing file means.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "MAILSEARCH_CONFIG_DIR";

/// Name of the directory under the platform config dir
const APP_DIR: &str = "mailsearch";

/// Get the mailsearch config directory
///
/// `MAILSEARCH_CONFIG_DIR` wins when set and non-empty, otherwise
/// `<platform config dir>/mailsearch`.
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|p| p.join(APP_DIR)),
    }
}

/// Get the path to a file within the config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Load and parse a JSON file from the config directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

/// Load a JSON file from the config directory, `None` if it does not exist
///
/// A file that exists but fails to parse is still an error.
pub fn load_json_opt<T: DeserializeOwned>(filename: &str) -> Result<Option<T>> {
    match config_path(filename) {
        Some(path) => load_json_file_opt(&path),
        None => Ok(None),
    }
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load a JSON file from an arbitrary path, `None` if it does not exist
pub fn load_json_file_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    load_json_file(path).map(Some)
}

/// Check if a config file exists in the config directory
pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|p| p.exists())
}
