//! Platform-specific paths for presets and configuration.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/lumen/` (Linux),
//!   `~/Library/Application Support/lumen/` (macOS),
//!   `%APPDATA%\lumen\` (Windows)
//! - **Global settings**: `<config>/settings.toml`
//! - **User presets**: `<config>/presets/*.toml`

use std::path::{Path, PathBuf};

use crate::error::SessionError;

/// Application name used for directory paths.
const APP_NAME: &str = "lumen";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// File name for persisted global settings.
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific presets directory under a config directory.
pub fn presets_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(PRESETS_SUBDIR)
}

/// Returns the global settings file under a config directory.
pub fn settings_file(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE)
}

/// Turn a user-chosen preset name into a file stem.
///
/// Alphanumerics, spaces, dots, underscores, and dashes pass through;
/// anything else becomes a dash. Names that collapse to nothing are
/// rejected.
pub fn preset_file_stem(name: &str) -> Result<String, SessionError> {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if stem.trim_matches(['-', '.', ' ']).is_empty() {
        return Err(SessionError::InvalidPresetName(name.to_string()));
    }
    Ok(stem)
}

/// Full path of the preset file for a name, under a presets directory.
pub fn preset_path(presets_dir: &Path, name: &str) -> Result<PathBuf, SessionError> {
    Ok(presets_dir.join(format!("{}.toml", preset_file_stem(name)?)))
}
