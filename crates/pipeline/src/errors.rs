//! Error types for the release-notes domain.
//!
//! [`ParseFailure`] is the only error the normalizer produces, and it is
//! reported inline rather than raised. The port errors ([`LlmError`],
//! [`SourceError`], [`SinkError`]) are returned by infrastructure adapters;
//! [`ScribeError`] is what a run fails with.
//!
//! None of these carry retry hints: a failed call is reported, never retried.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// The commit payload is not valid JSON or not an array of objects.
///
/// The `Display` form is exactly the diagnostic entry the normalizer emits in
/// place of the whole sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Failed to parse commit messages: {diagnostic}")]
pub struct ParseFailure {
    /// Parser diagnostic (e.g. `"expected value at line 1 column 1"`).
    pub diagnostic: String,
}

impl From<serde_json::Error> for ParseFailure {
    fn from(err: serde_json::Error) -> Self {
        Self {
            diagnostic: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failures reported by an [`crate::LlmProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LlmError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("LLM transport error: {message}")]
    Transport {
        /// Underlying client error text.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("LLM provider returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned (often a JSON error object).
        body: String,
    },

    /// The response body could not be decoded.
    #[error("LLM response could not be decoded: {message}")]
    InvalidResponse {
        /// Decoder error text.
        message: String,
    },

    /// The response decoded but contained no completion text.
    #[error("LLM response contained no completion text")]
    EmptyResponse,
}

/// Failures reported by a [`crate::CommitSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SourceError {
    /// Reading local input failed.
    #[error("Failed to read commits from {origin}: {message}")]
    Io {
        /// Where the commits were read from (e.g. `"stdin"`).
        origin: String,
        /// Underlying error text.
        message: String,
    },

    /// The remote request never produced an HTTP response.
    #[error("Commit source transport error: {message}")]
    Transport {
        /// Underlying client error text.
        message: String,
    },

    /// The remote answered with a non-success status.
    #[error("Commit source returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The remote response could not be decoded into commits.
    #[error("Commit source response could not be decoded: {message}")]
    InvalidResponse {
        /// Decoder error text.
        message: String,
    },
}

/// Failures reported by a [`crate::NoteSink`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Failed to write note to {location}: {message}")]
pub struct SinkError {
    /// Where the note was being written (e.g. a file path).
    pub location: String,
    /// Underlying error text.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Run-level errors
// ---------------------------------------------------------------------------

/// Errors that abort a release-notes run.
///
/// A malformed commit payload is deliberately absent: it is reported inline
/// through [`ParseFailure`] and the run still completes.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ScribeError {
    /// The completion provider failed.
    #[error(transparent)]
    Completion(#[from] LlmError),

    /// The commits could not be obtained.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A note could not be stored.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// The runtime configuration is invalid.
    ///
    /// Produced at start-up; a run never starts with an invalid config.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },
}

impl ScribeError {
    /// Shorthand for [`ScribeError::ConfigurationError`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failure_display_is_the_diagnostic_entry() {
        let err = ParseFailure {
            diagnostic: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse commit messages: expected value at line 1 column 1"
        );
    }

    #[test]
    fn port_errors_convert_into_scribe_error_transparently() {
        let err: ScribeError = LlmError::Status {
            status: 429,
            body: "slow down".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "LLM provider returned HTTP 429: slow down");

        let err: ScribeError = SinkError {
            location: "out/releaseNotes0.txt".to_string(),
            message: "permission denied".to_string(),
        }
        .into();
        assert!(matches!(err, ScribeError::Sink(_)));
    }
}
