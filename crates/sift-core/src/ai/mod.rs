//! Pluggable AI backend abstraction
//!
//! This module provides a backend-agnostic interface for the categorization
//! engine's single AI operation: turning a prompt into a text completion.
//!
//! # Architecture
//!
//! - `AiBackend` trait: defines the completion interface
//! - `AiClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `ClaudeBackend` (Anthropic Messages API),
//!   `MockBackend` (canned responses for tests)
//!
//! # Usage
//!
//! ```rust,ignore
//! // Create from environment
//! let ai = AiClient::from_env();
//!
//! if let Some(ref client) = ai {
//!     let text = client.complete("Categorize these transactions...").await?;
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `ANTHROPIC_API_KEY`: API credential (required; absence selects demo mode)
//! - `ANTHROPIC_BASE_URL`: API endpoint (default: `https://api.anthropic.com`)
//! - `ANTHROPIC_MODEL`: Model name (default: `claude-sonnet-4-20250514`)
//! - `SIFT_AI_TIMEOUT_SECS`: Request timeout in seconds (default: 30)

mod claude;
mod mock;
pub mod parsing;
pub mod prompt;

pub use claude::ClaudeBackend;
pub use mock::MockBackend;
pub use parsing::CategoryAssignment;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all AI backends
///
/// Backends must be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Send a prompt and return the model's text completion
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AiClient {
    /// Anthropic Messages API backend
    Claude(ClaudeBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AiClient {
    /// Create an AI client from environment variables
    ///
    /// Returns None when `ANTHROPIC_API_KEY` is not set; the caller treats
    /// that as demo mode rather than an error.
    pub fn from_env() -> Option<Self> {
        ClaudeBackend::from_env().map(AiClient::Claude)
    }

    /// Create a Claude backend directly
    pub fn claude(base_url: &str, api_key: &str, model: &str) -> Self {
        AiClient::Claude(ClaudeBackend::new(base_url, api_key, model))
    }

    /// Create a mock backend that replies with the given text
    pub fn mock(response: &str) -> Self {
        AiClient::Mock(MockBackend::with_response(response))
    }

    /// Create a mock backend that fails every call
    pub fn mock_failing() -> Self {
        AiClient::Mock(MockBackend::failing())
    }
}

#[async_trait]
impl AiBackend for AiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self {
            AiClient::Claude(b) => b.complete(prompt).await,
            AiClient::Mock(b) => b.complete(prompt).await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AiClient::Claude(b) => b.model(),
            AiClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AiClient::Claude(b) => b.host(),
            AiClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AiClient::mock("[]");
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_complete() {
        let client = AiClient::mock(r#"[{"index": 0, "category": "Dining", "confidence": 0.9}]"#);
        let text = client.complete("anything").await.unwrap();
        assert!(text.contains("Dining"));
    }

    #[tokio::test]
    async fn test_mock_failing_complete() {
        let client = AiClient::mock_failing();
        assert!(client.complete("anything").await.is_err());
    }
}
