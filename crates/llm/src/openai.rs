//! OpenAI chat-completions provider.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{Completion, CompletionRequest, LlmError, LlmProvider, TokenCount, TokenUsage};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Chat-completions endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Whole-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("scribe/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`OpenAiProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    /// Full URL of the chat-completions endpoint.
    pub endpoint: String,
    /// Bearer token. Omitted from the request when `None` (local gateways).
    pub api_key: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// [`LlmProvider`] backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiProvider {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiProvider {
    /// Builds the provider and its HTTP client.
    ///
    /// # Errors
    ///
    /// [`LlmError::Transport`] if the HTTP client cannot be constructed.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LlmError::Transport {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            api_key: config.api_key,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    #[instrument(skip_all, fields(model = %request.model, endpoint = %self.endpoint))]
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
        let body = ChatRequest {
            model: request.model.as_str(),
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        let mut req = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| LlmError::Transport {
            message: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| LlmError::Transport {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse {
                message: e.to_string(),
            })?;

        let usage = parsed.usage.map(|u| TokenUsage {
            prompt_tokens: TokenCount::new(u.prompt_tokens),
            completion_tokens: TokenCount::new(u.completion_tokens),
        });

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        debug!(
            chars = content.len(),
            total_tokens = usage.map(|u| u.total().as_u64()),
            "Completion received"
        );

        Ok(Completion {
            text: content,
            usage,
        })
    }
}
