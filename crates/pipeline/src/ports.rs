//! Port traits implemented by infrastructure crates.
//!
//! The domain never constructs an HTTP client or touches the filesystem; it is
//! handed implementations of these traits instead. This keeps the normalizer
//! and the generator testable with in-memory fakes.

use async_trait::async_trait;

use crate::{Completion, CompletionRequest, LlmError, NoteNumber, SinkError, SourceError};

/// A text-completion capability (e.g. an OpenAI-compatible chat API).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Submits `request` and returns the generated text.
    ///
    /// Implementations make exactly one attempt; failures are returned as-is.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError>;
}

/// Supplies the raw commit payload handed to the normalizer.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Returns the commits as a JSON array text.
    ///
    /// The text is not validated here; shape problems surface as a
    /// [`crate::ParseFailure`] during normalization.
    async fn read_commits(&self) -> Result<String, SourceError>;
}

/// Stores generated release notes.
#[async_trait]
pub trait NoteSink: Send + Sync {
    /// Stores note `number`, replacing any previous note with that number.
    ///
    /// Returns a human-readable location (e.g. the file path written).
    async fn write_note(&self, number: NoteNumber, text: &str) -> Result<String, SinkError>;
}
