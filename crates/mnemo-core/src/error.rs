//! Error types for mnemo.

use thiserror::Error;

/// Result type alias using mnemo's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mnemo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Item not found
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// Collection not found
    #[error("Collection not found: {0}")]
    CollectionNotFound(i64),

    /// Remote generation failed (single attempt)
    #[error("Inference error: {0}")]
    Inference(String),

    /// Remote generation failed on every attempt of the retry budget
    #[error("Remote extraction failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport failed before a response arrived
    #[error("Request error: {0}")]
    Request(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_item_not_found() {
        let err = Error::ItemNotFound(1_700_000_000_000);
        assert_eq!(err.to_string(), "Item not found: 1700000000000");
    }

    #[test]
    fn test_error_display_collection_not_found() {
        let err = Error::CollectionNotFound(42);
        assert_eq!(err.to_string(), "Collection not found: 42");
    }

    #[test]
    fn test_error_display_retries_exhausted() {
        let err = Error::RetriesExhausted {
            attempts: 3,
            last_error: "Remote returned 503".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Remote extraction failed after 3 attempts: Remote returned 503"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("Note text cannot be blank".to_string());
        assert_eq!(err.to_string(), "Invalid input: Note text cannot be blank");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
