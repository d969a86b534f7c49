//! Error types for Edunova
//!
//! Provides error handling for:
//! - Quiz fetches against the backend
//! - Cache-miss recovery from persisted roadmap state
//! - Session cookie encoding
//! - Configuration loading

use crate::types::NodeId;
use std::path::PathBuf;

/// Transport or server failure from a backend capability
///
/// Carries messages rather than source errors so it can be shared between
/// callers waiting on the same in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Backend error message, or the body when it carried none
        message: String,
    },

    /// Response body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Create status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Missing persisted state on the cache-miss path
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    /// No roadmap in session state
    #[error("roadmap data not found")]
    Roadmap,

    /// Persisted roadmap has no node with this id
    #[error("node data not found: {0}")]
    Node(NodeId),
}

/// Errors surfaced when loading a node's quiz
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    /// Request context could not be reconstructed
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// Quiz fetch capability failed
    #[error("quiz fetch failed: {0}")]
    FetchFailed(#[from] FetchError),
}

impl QuizError {
    /// Check if error is a missing-state condition
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if re-invoking the load may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchFailed(_))
    }
}

/// Errors encoding or decoding session state
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Roadmap could not be serialized
    #[error("failed to encode session state: {0}")]
    Encode(#[source] serde_json::Error),

    /// Stored value is not a valid roadmap
    #[error("failed to decode session state: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Errors loading client configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        assert_eq!(NotFound::Roadmap.to_string(), "roadmap data not found");
        assert_eq!(
            NotFound::Node(NodeId(4)).to_string(),
            "node data not found: 4"
        );
    }

    #[test]
    fn quiz_error_classification() {
        let missing: QuizError = NotFound::Roadmap.into();
        assert!(missing.is_not_found());
        assert!(!missing.is_retryable());

        let failed: QuizError = FetchError::status(500, "Failed to create quiz").into();
        assert!(failed.is_retryable());
        assert!(!failed.is_not_found());
        assert_eq!(
            failed.to_string(),
            "quiz fetch failed: backend returned 500: Failed to create quiz"
        );
    }

    #[test]
    fn not_found_is_transparent() {
        let err: QuizError = NotFound::Node(NodeId(2)).into();
        assert_eq!(err.to_string(), "node data not found: 2");
    }

    #[test]
    fn structured_fields() {
        let FetchError::Status { status, message } = FetchError::status(404, "No chunks found")
        else {
            panic!("expected status error");
        };
        assert_eq!((status, message.as_str()), (404, "No chunks found"));

        let err = ConfigError::io_error(
            "/etc/edunova.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, ConfigError::Io { ref path, .. } if path.ends_with("edunova.toml")));
        assert_eq!(err.to_string(), "io error reading /etc/edunova.toml: missing");
    }
}
