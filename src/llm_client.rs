//! Completion capability backed by an OpenAI-compatible chat API.
//!
//! One [`LlmClient`] is bound to one model and one credential. Every call to
//! [`Completion::complete`] issues exactly one request; there is no retry.

use crate::error::{ClassifyError, OptionExt, Result};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Groq's OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used when none is given
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default generation length
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Config for the default provider and model with the given credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }

    /// Same provider and credential, bound to another model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }
}

/// A single generation request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    /// Passed through unchecked; providers expect [0, 1]
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Anything that can turn a prompt into generated text.
pub trait Completion: Send + Sync {
    /// Run one completion, reporting why it failed.
    fn complete(&self, request: &CompletionRequest) -> impl Future<Output = Result<String>> + Send;

    /// Run one completion, logging any failure and returning `None`.
    fn complete_or_none(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Option<String>> + Send {
        async move {
            match self.complete(request).await {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(error = %e, "Completion failed");
                    None
                }
            }
        }
    }
}

/// OpenAI-compatible API response structures
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// HTTP completion client bound to one model
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Model identifier this client is bound to
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl Completion for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "user", "content": request.prompt}
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature
        });

        let api_url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        debug!(model = %self.config.model, "Sending LLM request");

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(ClassifyError::Network)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Api {
                code: status.as_u16(),
                message: format!("LLM API error: {} - {}", status, error_text),
            });
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Parse(format!("Failed to parse LLM response: {}", e)))?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_parse("LLM response has no message content")
    }
}
