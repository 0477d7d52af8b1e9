// OpenAI-compatible chat completions generator
//
// Works against api.openai.com and any server speaking the same
// `/v1/chat/completions` format.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::retry::{with_retry, Permanent};
use super::{GenerationParams, Generator};
use crate::config::OpenAiSettings;
use crate::errors::{missing_api_key_hint, StoryError};

/// Live generator backed by an OpenAI-compatible HTTP API
#[derive(Clone)]
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_attempts: u32,
}

impl OpenAiGenerator {
    /// Build the generator, failing before any request if no key is set.
    pub fn from_settings(settings: &OpenAiSettings) -> Result<Self, StoryError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StoryError::unavailable(missing_api_key_hint()))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| StoryError::unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            max_attempts: settings.max_attempts,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_request(&self, prompt: &str, params: GenerationParams) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: params.max_output_tokens,
            temperature: params.temperature,
            stream: false,
        }
    }

    /// Send a single request (no retry)
    async fn invoke_once(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!("Sending request to {}: {:?}", url, request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .context("Failed to send request to generation service")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = format!(
                "Chat completion request failed\n\nStatus: {}\nBody: {}",
                status, error_body
            );
            if is_permanent(status) {
                return Err(Permanent(message).into());
            }
            anyhow::bail!(message);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        tracing::debug!("Received response: {:?}", chat_response);

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .context("Generation service returned no choices")?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn invoke(&self, prompt: &str, params: GenerationParams) -> Result<String, StoryError> {
        let request = self.to_request(prompt, params);
        with_retry(self.max_attempts, || self.invoke_once(&request))
            .await
            .map_err(|e| StoryError::unavailable(format!("{e:#}")))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Client errors other than timeout and rate limiting will not succeed on retry
fn is_permanent(status: StatusCode) -> bool {
    status.is_client_error()
        && status != StatusCode::REQUEST_TIMEOUT
        && status != StatusCode::TOO_MANY_REQUESTS
}

// Chat completions wire types

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "is_false")]
    stream: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
