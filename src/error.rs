//! Error types for unoffice library.

use std::io;
use thiserror::Error;

/// Result type alias for unoffice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering documents.
///
/// Unresolved images and charts are deliberately absent from this list:
/// they degrade to a visible placeholder in the output instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required node of the element stream is absent or malformed.
    #[error("Malformed document structure: {0}")]
    Structure(String),

    /// No builder or converter exists for the requested format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The element stream could not be decoded.
    #[error("Element stream decoding error: {0}")]
    Json(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Section number is out of range.
    #[error("Section {0} is out of range (document has {1} sections)")]
    SectionOutOfRange(u32, u32),

    /// Invalid section range specification.
    #[error("Invalid section range: {0}")]
    InvalidSectionRange(String),

    /// Every strategy in a chain failed.
    #[error("All strategies failed for {subject}: {attempts}")]
    StrategyExhausted {
        /// What the chain was trying to produce
        subject: String,
        /// Names and failures of the attempted strategies
        attempts: String,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a structure error.
    pub fn structure(msg: impl Into<String>) -> Self {
        Error::Structure(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Json(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::structure("table without rows");
        assert_eq!(
            err.to_string(),
            "Malformed document structure: table without rows"
        );

        let err = Error::SectionOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Section 10 is out of range (document has 5 sections)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
