//! Error types for configuration and patch operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
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

    /// Failed to create directory
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

    /// Modulator identifier not recognised
    #[error("unknown modulator type: {0}")]
    UnknownModType(String),

    /// Parameter string id not recognised
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    /// Wavetable preset name not recognised
    #[error("unknown wavetable preset: {0}")]
    UnknownPreset(String),

    /// Patch describes more slots than the panel has
    #[error("patch has {found} slots, at most {max} supported")]
    TooManySlots {
        /// Slots present in the patch.
        found: usize,
        /// Slots the panel provides.
        max: usize,
    },

    /// A value is outside its permitted range
    #[error("invalid value {value} for '{field}': {reason}")]
    InvalidValue {
        /// Field or parameter the value belongs to.
        field: String,
        /// The rejected value.
        value: f64,
        /// Description of why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, value: impl Into<f64>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
