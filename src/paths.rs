//! Centralized path definitions for habityzer
//!
//! ```text
//! ~/.habityzer/
//! └── config.toml               # API origin, token, default project
//! ```

use std::path::PathBuf;

/// Global config directory name
const GLOBAL_DIR: &str = ".habityzer";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global habityzer directory.
///
/// Returns `~/.habityzer/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.habityzer/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
