//! Claude backend over the Anthropic Messages API
//!
//! Sends a single user message per categorization batch and returns the
//! text completion. The base URL is overridable so tests can point at a
//! local mock server instead of the hosted API.
//!
//! # Configuration
//!
//! Environment variables:
//! - `ANTHROPIC_API_KEY`: API credential (required)
//! - `ANTHROPIC_BASE_URL`: API endpoint (default: `https://api.anthropic.com`)
//! - `ANTHROPIC_MODEL`: Model name (default: `claude-sonnet-4-20250514`)
//! - `SIFT_AI_TIMEOUT_SECS`: Request timeout in seconds (default: 30)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::AiBackend;

/// Default Anthropic API endpoint
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default model for categorization
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Messages API protocol version header
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Completion budget for a categorization batch
const MAX_TOKENS: u32 = 4096;

/// Anthropic Messages API request
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

/// Message in conversation
#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

impl Message {
    /// Create a user message with text content
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: text.into(),
        }
    }
}

/// Content block in a Messages API response
///
/// Plain completions only produce text blocks; anything else is skipped
/// when extracting text.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Anthropic Messages API response
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    #[allow(dead_code)]
    usage: Option<Usage>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
struct Usage {
    #[allow(dead_code)]
    input_tokens: u32,
    #[allow(dead_code)]
    output_tokens: u32,
}

impl MessagesResponse {
    /// Extract text content from the response
    fn text(&self) -> Option<String> {
        let texts: Vec<_> = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }
}

/// Claude backend for the hosted Anthropic Messages API
#[derive(Clone)]
pub struct ClaudeBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl ClaudeBackend {
    /// Create a new Claude backend with the default timeout
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self::with_timeout(
            base_url,
            api_key,
            model,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a new Claude backend with a custom request timeout
    pub fn with_timeout(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout,
        }
    }

    /// Create from environment (ANTHROPIC_API_KEY required)
    ///
    /// Returns None when the key is unset or empty; that is not an error,
    /// it selects demo mode.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())?;
        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout = std::env::var("SIFT_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Some(Self::with_timeout(&base_url, &api_key, &model, timeout))
    }
}

#[async_trait]
impl AiBackend for ClaudeBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message::user(prompt)],
        };

        debug!(model = %self.model, "Sending categorization request to Claude");

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let messages_response: MessagesResponse = response.json().await?;

        debug!(
            stop_reason = ?messages_response.stop_reason,
            "Received Claude response"
        );

        messages_response
            .text()
            .ok_or_else(|| Error::InvalidResponse("No text in response".into()))
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
