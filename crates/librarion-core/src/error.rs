//! Error types for Librarion
//!
//! This module defines the error types used throughout the Librarion system.
//! The lookup and session faults (`NotFound`, `InvalidState`) indicate
//! data-integrity or programming errors with no recovery path; they must
//! surface immediately instead of being swallowed.

use thiserror::Error;
use std::io;

/// Librarion error types
#[derive(Debug, Error)]
pub enum LibrarionError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Artifact error (malformed or inconsistent precomputed dataset)
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Title absent from a dataset that must contain it
    #[error("Book not found: {0}")]
    NotFound(String),

    /// Session state machine misuse
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for Librarion operations
pub type Result<T> = std::result::Result<T, LibrarionError>;

impl From<serde_json::Error> for LibrarionError {
    fn from(err: serde_json::Error) -> Self {
        LibrarionError::Deserialization(err.to_string())
    }
}

impl LibrarionError {
    /// Shorthand for a `NotFound` error about a book title.
    pub fn book_not_found(title: &str) -> Self {
        LibrarionError::NotFound(title.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_error_display() {
        let err = LibrarionError::Config("test".to_string());
        assert_eq!(err.to_string(), "Configuration error: test");

        let err = LibrarionError::Artifact("test".to_string());
        assert_eq!(err.to_string(), "Artifact error: test");

        let err = LibrarionError::NotFound("test".to_string());
        assert_eq!(err.to_string(), "Book not found: test");

        let err = LibrarionError::InvalidState("test".to_string());
        assert_eq!(err.to_string(), "Invalid session state: test");

        let err = LibrarionError::Deserialization("test".to_string());
        assert_eq!(err.to_string(), "Deserialization error: test");
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: LibrarionError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_conversion_from_serde() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: LibrarionError = json_err.into();
        assert!(err.to_string().contains("Deserialization error"));
    }

    #[test]
    fn test_book_not_found_shorthand() {
        let err = LibrarionError::book_not_found("The Hobbit");
        assert_eq!(err.to_string(), "Book not found: The Hobbit");
    }
}
