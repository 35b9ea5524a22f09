//! Error types for preset compilation and persistence.

use std::path::PathBuf;

use helaix_catalog::CatalogError;
use helaix_core::DocumentError;
use thiserror::Error;

/// Errors that can occur while compiling, loading or saving presets.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The baseline template could not be produced
    #[error("failed to load preset template: {0}")]
    Template(String),

    /// The model catalog could not be loaded
    #[error("model catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

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

    /// Failed to parse or encode JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to encode a preset document
    #[error("failed to encode preset: {0}")]
    Document(#[from] DocumentError),

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl PresetError {
    /// Create a template error.
    pub fn template(reason: impl std::fmt::Display) -> Self {
        PresetError::Template(reason.to_string())
    }

    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
