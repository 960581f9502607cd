//! Error types for loading, cleaning and recommending.
//!
//! Errors are serializable so a front end can show them as
//! `{ "code": ..., "message": ... }` without string matching.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One failed decode/parse/clean attempt for a candidate encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingAttempt {
    /// Encoding label as configured (e.g. `"ISO-8859-1"`).
    pub encoding: String,
    /// Why the attempt was abandoned.
    pub reason: String,
}

impl fmt::Display for EncodingAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.encoding, self.reason)
    }
}

/// Failure to produce a cleaned table from a source.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source could not be read at all.
    #[error("Could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every candidate encoding failed to decode, parse or clean.
    #[error(
        "Could not read the file with any of {} encodings ({})",
        .attempts.len(),
        format_attempts(.attempts)
    )]
    EncodingsExhausted { attempts: Vec<EncodingAttempt> },
}

fn format_attempts(attempts: &[EncodingAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoadError {
    /// Attempts recorded before giving up (empty for I/O failures).
    pub fn attempts(&self) -> &[EncodingAttempt] {
        match self {
            Self::Io { .. } => &[],
            Self::EncodingsExhausted { attempts } => attempts,
        }
    }
}

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum DineError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Text could not be decoded with the given encoding.
    #[error("Input is not valid {0}")]
    Decode(String),

    /// An encoding label is not known to the registry.
    #[error("Unknown encoding label '{0}'")]
    UnknownEncoding(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl DineError {
    /// Stable code for front-end handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::Decode(_) => "DECODE_FAILED",
            Self::UnknownEncoding(_) => "UNKNOWN_ENCODING",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
        }
    }
}

impl Serialize for DineError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DineError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, DineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn exhausted() -> LoadError {
        LoadError::EncodingsExhausted {
            attempts: vec![
                EncodingAttempt {
                    encoding: "utf-8".to_string(),
                    reason: "Input is not valid UTF-8".to_string(),
                },
                EncodingAttempt {
                    encoding: "latin1".to_string(),
                    reason: "Column 'City' not found in dataset".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            DineError::ColumnNotFound("City".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            DineError::UnknownEncoding("klingon".to_string()).error_code(),
            "UNKNOWN_ENCODING"
        );
    }

    #[test]
    fn test_exhausted_message_lists_attempts() {
        let message = exhausted().to_string();
        assert!(message.contains("2 encodings"));
        assert!(message.contains("utf-8: Input is not valid UTF-8"));
        assert!(message.contains("latin1: Column 'City'"));
    }

    #[test]
    fn test_io_error_has_no_attempts() {
        let error = LoadError::Io {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(error.attempts().is_empty());
        assert!(error.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_error_serialization() {
        let error = DineError::ColumnNotFound("Cuisines".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Cuisines"));
    }
}
