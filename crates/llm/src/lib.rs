//! scribe LLM provider infrastructure adapter.
//!
//! Implements the [`pipeline::LlmProvider`] trait for OpenAI-compatible
//! chat-completions APIs. Additional providers are added as new modules in
//! this crate without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting and response
//! parsing live here. The [`pipeline`] crate sees only
//! [`pipeline::LlmProvider`]. Calls are made once; there is no back-off.

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiProvider, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT};
