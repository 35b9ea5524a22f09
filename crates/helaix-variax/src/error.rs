//! Error types for Variax configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a [`VariaxConfig`](crate::VariaxConfig).
///
/// Resolution never fails; these only surface from the explicit loaders.
#[derive(Debug, Error)]
pub enum VariaxError {
    /// Failed to read a configuration file.
    #[error("failed to read Variax configuration '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON of the expected shape.
    #[error("failed to parse Variax configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl VariaxError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VariaxError::ReadFile {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn read_file_display() {
        let err = VariaxError::read_file(
            "/etc/variax.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "mock"),
        );
        let msg = err.to_string();
        assert!(msg.contains("failed to read Variax configuration"), "got: {msg}");
        assert!(msg.contains("/etc/variax.json"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn parse_from_serde() {
        let err: VariaxError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("failed to parse Variax configuration"));
    }
}
