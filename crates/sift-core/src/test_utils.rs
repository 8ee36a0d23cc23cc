//! Test utilities for sift-core
//!
//! This module provides testing infrastructure including a mock Claude
//! server that speaks enough of the Messages API for development and
//! integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// How the mock server answers completion requests
enum MockBehavior {
    /// Categorize the transactions listed in the prompt by keyword
    Categorize,
    /// Answer every request with this completion text
    Canned(String),
    /// Fail every request with an overloaded error
    Overloaded,
}

/// Mock Claude server for testing and development
pub struct MockClaudeServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockClaudeServer {
    /// Start a mock that categorizes prompt transactions by keyword
    pub async fn start() -> Self {
        Self::serve(MockBehavior::Categorize).await
    }

    /// Start a mock that answers every request with the given text
    pub async fn start_with_text(text: &str) -> Self {
        Self::serve(MockBehavior::Canned(text.to_string())).await
    }

    /// Start a mock that rejects every request as overloaded (HTTP 529)
    pub async fn start_overloaded() -> Self {
        Self::serve(MockBehavior::Overloaded).await
    }

    async fn serve(behavior: MockBehavior) -> Self {
        let app = Router::new()
            .route("/v1/messages", post(handle_messages))
            .with_state(Arc::new(behavior));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockClaudeServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Messages endpoint
async fn handle_messages(
    State(behavior): State<Arc<MockBehavior>>,
    Json(request): Json<MessagesRequest>,
) -> Response {
    match &*behavior {
        MockBehavior::Overloaded => (
            StatusCode::from_u16(529).unwrap(),
            Json(serde_json::json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })),
        )
            .into_response(),
        MockBehavior::Canned(text) => {
            Json(message_response(&request.model, text)).into_response()
        }
        MockBehavior::Categorize => {
            let prompt = request
                .messages
                .last()
                .map(|m| m.content.as_str())
                .unwrap_or("");
            let text = categorize_prompt_mock(prompt);
            Json(message_response(&request.model, &text)).into_response()
        }
    }
}

/// Wrap completion text in a Messages API response envelope
fn message_response(model: &str, text: &str) -> MessagesResponse {
    MessagesResponse {
        id: "msg_mock_01".to_string(),
        kind: "message".to_string(),
        role: "assistant".to_string(),
        model: model.to_string(),
        content: vec![ContentBlock {
            kind: "text".to_string(),
            text: text.to_string(),
        }],
        stop_reason: "end_turn".to_string(),
        usage: Usage {
            input_tokens: 100,
            output_tokens: 50,
        },
    }
}

/// Produce a categorization answer from the transaction lines in the prompt
///
/// The prompt lists transactions as `N. DESCRIPTION - $AMOUNT`, one per
/// line, between the "Transactions:" header and the instructions.
fn categorize_prompt_mock(prompt: &str) -> String {
    let listing = prompt
        .split_once("Transactions:\n")
        .map(|(_, rest)| rest)
        .unwrap_or(prompt);
    let listing = listing
        .split("\n\nFor each transaction")
        .next()
        .unwrap_or("");

    let assignments: Vec<serde_json::Value> = listing
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let description = line.split_once(". ").map(|(_, rest)| rest).unwrap_or(line);
            let description = description
                .rsplit_once(" - $")
                .map(|(d, _)| d)
                .unwrap_or(description);
            let (category, confidence, reasoning) = mock_category(description);
            serde_json::json!({
                "index": index,
                "category": category,
                "confidence": confidence,
                "reasoning": reasoning,
            })
        })
        .collect();

    serde_json::to_string_pretty(&assignments).unwrap()
}

/// Keyword-based category guess standing in for the hosted model
fn mock_category(description: &str) -> (&'static str, f64, &'static str) {
    let d = description.to_uppercase();

    if d.contains("GROCERY")
        || d.contains("SAFEWAY")
        || d.contains("WHOLE FOODS")
        || d.contains("TRADER")
    {
        ("Groceries", 0.97, "Grocery store purchase")
    } else if d.contains("STARBUCKS")
        || d.contains("CAFE")
        || d.contains("RESTAURANT")
        || d.contains("MCDONALD")
    {
        ("Dining", 0.93, "Restaurant or cafe")
    } else if d.contains("SHELL") || d.contains("CHEVRON") || d.contains("EXXON") || d.contains("FUEL")
    {
        ("Transportation", 0.96, "Fuel purchase")
    } else if d.contains("NETFLIX") || d.contains("SPOTIFY") || d.contains("SUBSCRIPTION") {
        ("Subscriptions", 0.94, "Recurring subscription")
    } else if d.contains("RENT") || d.contains("MORTGAGE") {
        ("Housing", 0.99, "Housing payment")
    } else if d.contains("PAYROLL") || d.contains("SALARY") || d.contains("DEPOSIT") {
        ("Income", 0.99, "Incoming funds")
    } else if d.contains("ELECTRIC") || d.contains("WATER") || d.contains("UTILITY") {
        ("Utilities", 0.95, "Utility bill")
    } else if d.contains("AMAZON") || d.contains("TARGET") || d.contains("WALMART") {
        ("Shopping", 0.9, "Retail purchase")
    } else {
        ("Miscellaneous", 0.5, "No clear signal")
    }
}

// Request/Response types for the mock server

#[derive(Debug, Deserialize)]
struct MessagesRequest {
    model: String,
    #[allow(dead_code)]
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Deserialize)]
struct RequestMessage {
    #[allow(dead_code)]
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct MessagesResponse {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    role: String,
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: String,
    usage: Usage,
}

#[derive(Debug, Serialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: String,
}

#[derive(Debug, Serialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}
