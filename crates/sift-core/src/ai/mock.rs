//! Mock backend for tests
//!
//! Returns a canned completion (or a canned failure) without any network
//! traffic, so engine behavior can be tested deterministically.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AiBackend;

/// Mock backend with a fixed response
#[derive(Clone)]
pub struct MockBackend {
    response: Option<String>,
}

impl MockBackend {
    /// Create a mock that completes with the given text
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
        }
    }

    /// Create a mock that fails every completion
    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl AiBackend for MockBackend {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(Error::InvalidResponse("Mock backend failure".into())),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
