//! Outbound chat-completion calls.
//!
//! The gateway posts a single user message to an OpenAI-compatible
//! chat-completion endpoint (OpenRouter by default) and returns the text of
//! the first choice. Calls are at-most-once: there is no retry, and a failed
//! call may still have been billed by the provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::LlmError;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ── Types ────────────────────────────────────────────────────────────────────

/// A single message in a chat-completion request.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Connection settings for the chat-completion provider.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bearer credential. `None` or empty fails every call before any I/O.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// ── Gateway ──────────────────────────────────────────────────────────────────

/// Anything that can turn a prompt into raw model text.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// [`ChatGateway`] backed by an OpenAI-compatible HTTP endpoint.
pub struct OpenRouterGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl OpenRouterGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Client(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => {
                error!("OpenRouter API key is missing");
                Err(LlmError::MissingCredential)
            }
        }
    }
}

#[async_trait]
impl ChatGateway for OpenRouterGateway {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key()?;

        let body = CompletionRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        info!(model = %self.config.model, prompt_len = prompt.len(), "calling chat completion");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| upstream(e.to_string()))?;

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| upstream(format!("unexpected response body: {e}")))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| upstream("response contained no choices".to_string()))?;

        info!(model = %self.config.model, text_len = text.len(), "chat completion received");

        Ok(text)
    }
}

fn upstream(message: String) -> LlmError {
    error!("error calling LLM: {message}");
    LlmError::Upstream(message)
}
