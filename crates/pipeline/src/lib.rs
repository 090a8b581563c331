//! Release-notes domain for scribe.
//!
//! This crate holds the commit message normalizer, the prompt template, the
//! shared value types, and the port traits that infrastructure crates
//! implement. It performs no I/O.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`normalizer`] | JSON payload parsing and message cleaning |
//! | [`commit`] | `CommitRecord` and `CleanedEntry` |
//! | [`prompt`] | The fixed release-notes prompt template |
//! | [`ports`] | `LlmProvider`, `CommitSource`, `NoteSink` |
//! | [`identifiers`] | Newtype identifiers (`ModelName`, `RepositoryId`, etc.) |
//! | [`types`] | Completion request/response and token accounting |
//! | [`errors`] | `ParseFailure`, port errors, and `ScribeError` |

pub mod commit;
pub mod errors;
pub mod identifiers;
pub mod normalizer;
pub mod ports;
pub mod prompt;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use commit::{CleanedEntry, CommitRecord, DEFAULT_AUTHOR, DEFAULT_DATE, DEFAULT_MESSAGE};
pub use errors::{LlmError, ParseFailure, ScribeError, SinkError, SourceError};
pub use identifiers::{BranchName, CommitSha, ModelName, NoteNumber, RepositoryId, RunId};
pub use normalizer::{clean_commit_messages, clean_message, normalize_commits, parse_commits};
pub use ports::{CommitSource, LlmProvider, NoteSink};
pub use prompt::ReleaseNotesPrompt;
pub use types::{Completion, CompletionRequest, TokenCount, TokenUsage};
