//! Error types for session persistence and external operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the session layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Preset already exists and overwrite was not allowed
    #[error("preset already exists: {0}")]
    PresetExists(String),

    /// Preset name unusable as a file name
    #[error("invalid preset name: '{0}'")]
    InvalidPresetName(String),

    /// Persistent storage is disabled for this session
    #[error("persistent storage is disabled for this session")]
    StorageDisabled,

    /// External audio generation failed
    #[error("audio generation failed: {0}")]
    AudioGeneration(String),
}

impl SessionError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
