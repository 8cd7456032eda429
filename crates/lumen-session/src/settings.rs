//! Persistence for the global settings record.
//!
//! Global settings load once at session start and are rewritten on every
//! change; there is no in-between caching layer to fall out of sync.

use std::path::Path;

use lumen_core::GlobalSettings;

use crate::error::SessionError;

/// Load global settings from a TOML file.
///
/// A missing file reads as the defaults; a malformed file is an error so
/// the caller can decide whether to fall back.
pub fn load_global_settings(path: impl AsRef<Path>) -> Result<GlobalSettings, SessionError> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(GlobalSettings::default());
        }
        Err(e) => return Err(SessionError::read_file(path, e)),
    };
    Ok(toml::from_str(&content)?)
}

/// Write global settings to a TOML file, creating parent directories.
pub fn save_global_settings(
    settings: &GlobalSettings,
    path: impl AsRef<Path>,
) -> Result<(), SessionError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| SessionError::create_dir(parent, e))?;
    }
    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content).map_err(|e| SessionError::write_file(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Complexity;

    #[test]
    fn missing_file_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_global_settings(dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, GlobalSettings::default());
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = GlobalSettings {
            animation_intensity: 85,
            visualizer_complexity: Complexity::High,
        };
        save_global_settings(&settings, &path).unwrap();
        assert_eq!(load_global_settings(&path).unwrap(), settings);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "animation_intensity = \"loud\"").unwrap();
        assert!(load_global_settings(&path).is_err());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "animation_intensity = 70\nvisualizer_complexity = \"low\"\nlegacy_option = true\n",
        )
        .unwrap();
        let settings = load_global_settings(&path).unwrap();
        assert_eq!(settings.animation_intensity, 70);
        assert_eq!(settings.visualizer_complexity, Complexity::Low);
    }
}
