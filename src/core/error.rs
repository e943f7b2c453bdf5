//! Error types for the vigbo-dl library
//!
//! Per-item faults (bad page, missing embedded data, failed transfer) are
//! recoverable: the batch loop logs them and moves on. Only the initial
//! list-file read is fatal to a run.

use std::fmt;

/// Main error type for vigbo-dl operations
#[derive(Debug)]
pub enum Error {
    /// HTTP-level failure: unexpected status or malformed response
    HttpError(String),

    /// Network connectivity issues (connect failures, timeouts)
    NetworkError(String),

    /// Embedded page data missing or malformed
    ParseError(String),

    /// File I/O error
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HttpError(msg) => {
                write!(f, "HTTP error: {}", msg)
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {}", msg)
            }
            Error::ParseError(msg) => {
                write!(f, "Parse error: {}", msg)
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::NetworkError(err.to_string())
        } else {
            Error::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

/// Convenience result type for vigbo-dl operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = Error::HttpError("status 500".to_string());
        assert_eq!(err.to_string(), "HTTP error: status 500");

        let err = Error::ParseError("missing gallery id".to_string());
        assert_eq!(err.to_string(), "Parse error: missing gallery id");
    }

    #[test]
    fn test_io_error_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io.into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: Error = bad.unwrap_err().into();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
