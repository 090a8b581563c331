//! scribe run orchestration.
//!
//! [`ReleaseNotesGenerator`] sequences one run: normalize the commit payload,
//! render a prompt per entry (or one for all entries), call the injected
//! [`pipeline::LlmProvider`], and hand each result to the injected
//! [`pipeline::NoteSink`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** The generator sequences calls between business
//! logic in the [`pipeline`] crate and infrastructure traits. It contains no
//! domain rules of its own and never constructs infrastructure.

pub mod generator;

pub use generator::{GeneratorSettings, ReleaseNotesGenerator, RunSummary, SummaryMode, WrittenNote};
