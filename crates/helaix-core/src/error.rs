//! Error types for preset document encoding.

use thiserror::Error;

/// Errors raised while converting a [`PresetDocument`](crate::PresetDocument)
/// to or from JSON.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input text is not a valid preset document.
    #[error("failed to parse preset document: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document could not be encoded.
    #[error("failed to serialize preset document: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn json_err() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn parse_display() {
        let msg = DocumentError::Parse(json_err()).to_string();
        assert!(msg.starts_with("failed to parse preset document"), "got: {msg}");
    }

    #[test]
    fn serialize_display() {
        let msg = DocumentError::Serialize(json_err()).to_string();
        assert!(msg.starts_with("failed to serialize preset document"), "got: {msg}");
    }

    #[test]
    fn source_is_exposed() {
        assert!(DocumentError::Parse(json_err()).source().is_some());
    }
}
