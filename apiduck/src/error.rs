//! Error types.

use thiserror::Error;

/// Errors raised while exporting documentation.
///
/// Schema derivation itself never fails at runtime; declaration problems
/// are reported by the derive macro at compile time.
#[derive(Debug, Error)]
pub enum Error {
    /// The document or an example value could not be encoded as JSON.
    #[error("failed to serialize documentation: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing the encoded document failed.
    #[error("failed to write documentation: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for fallible documentation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.to_string(), "failed to write documentation: disk full");
    }

    #[test]
    fn test_serialization_error_converts() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(source);
        assert!(matches!(err, Error::Serialization(_)));
    }
}
