//! Preset file format and operations.
//!
//! A preset is a named, wholesale snapshot of every plugin's settings.
//! Loading replaces the entire settings mapping; simulation state inside
//! visualizer bridges is never part of a preset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lumen_core::{ParamStore, PluginKind, PluginSettings};

use crate::error::SessionError;
use crate::paths;

/// Overwrite policy for saving a preset.
///
/// `Deny` is the library-level rendition of "overwrite requires
/// confirmation": the caller asks the user, then retries with `Allow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Replace an existing preset of the same name.
    Allow,
    /// Fail with [`SessionError::PresetExists`] if the name is taken.
    Deny,
}

/// A named snapshot of all plugin settings.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm Hall"
/// description = "Big room, slow bloom"
///
/// [plugins.reverb]
/// kind = "reverb"
/// mix = 60.0
/// size = 80.0
/// predelay_ms = 55.0
/// mood = "warm"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Unique, user-chosen name.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Full settings snapshot, one entry per plugin kind.
    #[serde(default)]
    pub plugins: BTreeMap<PluginKind, PluginSettings>,
}

impl Preset {
    /// Create an empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            plugins: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Capture the current settings of every plugin in the store.
    pub fn capture(name: impl Into<String>, store: &ParamStore) -> Self {
        Self {
            name: name.into(),
            description: None,
            plugins: store.export(),
        }
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SessionError::read_file(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Parse a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::create_dir(parent, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| SessionError::write_file(path, e))
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, SessionError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Directory-backed preset collection, keyed by unique name.
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    /// Create a store over a presets directory. The directory is created
    /// lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory presets are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a preset name.
    fn path_for(&self, name: &str) -> Result<PathBuf, SessionError> {
        paths::preset_path(&self.dir, name)
    }

    /// Whether a preset of this name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.exists()).unwrap_or(false)
    }

    /// Names of all stored presets, sorted.
    ///
    /// A missing presets directory reads as an empty collection.
    pub fn list(&self) -> Result<Vec<String>, SessionError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SessionError::read_file(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SessionError::read_file(&self.dir, e))?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }
            // Prefer the name recorded inside the file; fall back to the
            // file stem for hand-dropped files.
            match Preset::load(&path) {
                Ok(preset) => names.push(preset.name),
                Err(_) => {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_string());
                    }
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load a preset by name.
    pub fn load(&self, name: &str) -> Result<Preset, SessionError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(SessionError::PresetNotFound(name.to_string()));
        }
        Preset::load(path)
    }

    /// Save a preset under its name.
    ///
    /// With [`Overwrite::Deny`], an existing preset of the same name
    /// fails with [`SessionError::PresetExists`] and nothing is written.
    pub fn save(&self, preset: &Preset, overwrite: Overwrite) -> Result<(), SessionError> {
        let path = self.path_for(&preset.name)?;
        if overwrite == Overwrite::Deny && path.exists() {
            return Err(SessionError::PresetExists(preset.name.clone()));
        }
        preset.save(path)
    }

    /// Delete a preset by name.
    pub fn delete(&self, name: &str) -> Result<(), SessionError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(SessionError::PresetNotFound(name.to_string()));
        }
        std::fs::remove_file(&path).map_err(|e| SessionError::write_file(&path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_tempdir() -> (tempfile::TempDir, PresetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path().join("presets"));
        (dir, store)
    }

    #[test]
    fn capture_snapshots_every_plugin() {
        let mut params = ParamStore::new();
        params.set_param(PluginKind::Reverb, "mix", 75.0);
        let preset = Preset::capture("Test", &params);
        assert_eq!(preset.plugins.len(), PluginKind::ALL.len());
        assert_eq!(
            preset.plugins[&PluginKind::Reverb].param("mix"),
            Some(75.0)
        );
    }

    #[test]
    fn toml_roundtrip_preserves_settings_exactly() {
        let mut params = ParamStore::new();
        params.set_param(PluginKind::Reverb, "mix", 0.3);
        params.set_param(PluginKind::Compressor, "threshold_db", -17.25);

        let preset = Preset::capture("Exact", &params).with_description("roundtrip");
        let text = preset.to_toml().unwrap();
        let back = Preset::from_toml(&text).unwrap();
        assert_eq!(preset, back);
    }

    #[test]
    fn save_load_roundtrip_is_bit_for_bit() {
        let (_guard, store) = store_with_tempdir();
        let mut params = ParamStore::new();
        params.set_param(PluginKind::Reverb, "mix", 61.7);
        params.set_param(PluginKind::Delay, "time_ms", 333.3);
        params.update(PluginKind::Compressor, |s| {
            s.set_sidechain_active(true);
        });

        let saved = Preset::capture("Roundtrip", &params);
        store.save(&saved, Overwrite::Deny).unwrap();

        let loaded = store.load("Roundtrip").unwrap();
        assert_eq!(saved, loaded);
    }

    #[test]
    fn deny_refuses_to_overwrite() {
        let (_guard, store) = store_with_tempdir();
        let preset = Preset::capture("P1", &ParamStore::new());
        store.save(&preset, Overwrite::Deny).unwrap();

        let mut changed = preset.clone();
        changed.description = Some("changed".to_string());
        let err = store.save(&changed, Overwrite::Deny).unwrap_err();
        assert!(matches!(err, SessionError::PresetExists(_)));

        // The original survives untouched.
        let on_disk = store.load("P1").unwrap();
        assert_eq!(on_disk.description, None);

        store.save(&changed, Overwrite::Allow).unwrap();
        assert_eq!(
            store.load("P1").unwrap().description,
            Some("changed".to_string())
        );
    }

    #[test]
    fn load_missing_preset_errors() {
        let (_guard, store) = store_with_tempdir();
        assert!(matches!(
            store.load("nope"),
            Err(SessionError::PresetNotFound(_))
        ));
    }

    #[test]
    fn delete_removes_only_the_named_preset() {
        let (_guard, store) = store_with_tempdir();
        store
            .save(&Preset::capture("A", &ParamStore::new()), Overwrite::Deny)
            .unwrap();
        store
            .save(&Preset::capture("B", &ParamStore::new()), Overwrite::Deny)
            .unwrap();

        store.delete("A").unwrap();
        assert_eq!(store.list().unwrap(), vec!["B".to_string()]);
        assert!(matches!(
            store.delete("A"),
            Err(SessionError::PresetNotFound(_))
        ));
    }

    #[test]
    fn list_on_missing_directory_is_empty() {
        let (_guard, store) = store_with_tempdir();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn names_with_path_separators_do_not_escape_the_directory() {
        let (_guard, store) = store_with_tempdir();
        let preset = Preset::capture("../escape", &ParamStore::new());
        store.save(&preset, Overwrite::Deny).unwrap();
        // The sanitized file lives inside the presets directory.
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert!(store.dir().join("..-escape.toml").exists());
    }
}
