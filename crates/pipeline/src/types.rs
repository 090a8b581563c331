//! Shared value types exchanged with the completion provider.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! values that participate in computations (token accounting) or cross the
//! [`crate::LlmProvider`] port.

use serde::{Deserialize, Serialize};

use crate::ModelName;

// ---------------------------------------------------------------------------
// Token accounting
// ---------------------------------------------------------------------------

/// Number of tokens consumed by an LLM API call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenCount(u64);

impl TokenCount {
    /// Creates a [`TokenCount`] from a raw integer.
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for TokenCount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for TokenCount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

// ---------------------------------------------------------------------------

/// Token usage reported by the provider for one completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the submitted prompt.
    pub prompt_tokens: TokenCount,
    /// Tokens in the generated completion.
    pub completion_tokens: TokenCount,
}

impl TokenUsage {
    /// Prompt plus completion tokens.
    pub fn total(self) -> TokenCount {
        self.prompt_tokens + self.completion_tokens
    }
}

impl std::ops::AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.prompt_tokens += rhs.prompt_tokens;
        self.completion_tokens += rhs.completion_tokens;
    }
}

// ---------------------------------------------------------------------------
// Completion exchange
// ---------------------------------------------------------------------------

/// A single-turn text completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model the provider should use.
    pub model: ModelName,
    /// Full prompt text, sent as one user message.
    pub prompt: String,
}

/// Text returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text (Markdown release notes).
    pub text: String,
    /// Usage figures, when the provider reports them.
    pub usage: Option<TokenUsage>,
}
