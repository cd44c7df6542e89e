//! Gemini AI provider implementation.
//!
//! Calls `models/{model}:generateContent` once per question and returns the
//! first candidate's first text part.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Header carrying the key alongside the `key` query parameter.
const API_KEY_HEADER: &str = "x-goog-api-key";

const MISSING_KEY_MESSAGE: &str = "GEMINI_API_KEY not set";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// `None` keeps the service up but every question fails with a
    /// configuration error.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: Option<Secret<String>>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: GEMINI_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Transport(describe(&e)))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given model and method, without the key.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model,
            method
        )
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::NotConfigured(MISSING_KEY_MESSAGE.to_string()))
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, instruction: &str, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;
        let request = GenerateContentRequest::new(instruction, prompt);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .query(&[("key", api_key)])
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Gemini API returned an error status");
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        if let Some(usage) = &api_response.usage_metadata {
            tracing::debug!(
                input_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini token usage"
            );
        }

        api_response.into_first_text().ok_or(ProviderError::NoAnswer)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        self.api_key().map(|_| ())
    }
}

/// Map a reqwest failure onto the provider's transport kinds. The URL is
/// stripped first because it carries the key.
fn classify_transport_error(err: reqwest::Error) -> ProviderError {
    let err = err.without_url();
    let message = describe(&err);

    if err.is_timeout() {
        ProviderError::Timeout(message)
    } else if err.is_connect() {
        ProviderError::Connect(message)
    } else if err.is_decode() || err.is_body() {
        ProviderError::Decode(message)
    } else {
        ProviderError::Transport(message)
    }
}

/// Display of the error and its sources, joined with `: `.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// One user turn: the instruction part, then the prompt part.
    fn new(instruction: &str, prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::text(instruction), Part::text(prompt)],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Only text parts are read; other part kinds deserialize with `text: None`.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    fn into_first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}
