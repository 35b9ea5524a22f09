//! Error types for catalog loading.

use thiserror::Error;

/// Errors raised while building a [`Catalog`](crate::Catalog).
///
/// Cloneable so the outcome of the one-time builtin load can be handed to
/// every caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The dataset is not valid catalog JSON.
    #[error("failed to parse model catalog at line {line}, column {column}: {message}")]
    Parse {
        /// Line of the error.
        line: usize,
        /// Column of the error.
        column: usize,
        /// Parser message.
        message: String,
    },

    /// Two entries share an internal identifier.
    #[error("duplicate model identifier in catalog: {0}")]
    DuplicateId(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}
