//! Sift Web Server
//!
//! Axum-based REST API for transaction categorization.
//!
//! Security posture:
//! - Restrictive CORS policy (explicit origin allowlist)
//! - Input validation (batch size limit, shape checks)
//! - Sanitized error responses (internal details go to the log only)

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use sift_core::{Categorizer, CategorizedTransaction, Mode, Transaction};

/// Maximum transactions accepted in a single categorization request
///
/// Keeps the prompt for a single model call at a sane size; larger
/// uploads should be split by the caller.
pub const MAX_BATCH_SIZE: usize = 500;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub categorizer: Categorizer,
}

/// Categorization result payload
#[derive(Serialize)]
struct CategorizeResponse {
    categorized: Vec<CategorizedTransaction>,
    mode: Mode,
}

/// Health check payload
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    mode: Mode,
}

/// POST /api/categorize - Categorize a batch of transactions
///
/// The body is inspected as a loose JSON value first so an unparseable
/// body or a missing/non-array `transactions` field can be rejected with
/// a 400 before any per-item deserialization happens.
async fn categorize(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<CategorizeResponse>, AppError> {
    let Ok(Json(body)) = body else {
        return Err(AppError::bad_request("Invalid transactions data"));
    };

    let Some(transactions) = body.get("transactions").and_then(|v| v.as_array()) else {
        return Err(AppError::bad_request("Invalid transactions data"));
    };

    if transactions.len() > MAX_BATCH_SIZE {
        return Err(AppError::bad_request(&format!(
            "Batch too large: {} transactions (maximum {})",
            transactions.len(),
            MAX_BATCH_SIZE
        )));
    }

    // A transaction missing its required fields fails the whole batch
    let transactions: Vec<Transaction> =
        serde_json::from_value(serde_json::Value::Array(transactions.clone()))?;

    let batch = state.categorizer.categorize(&transactions).await;

    Ok(Json(CategorizeResponse {
        categorized: batch.transactions,
        mode: batch.mode,
    }))
}

/// GET /api/health - Service health and selected categorization mode
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        mode: state.categorizer.mode(),
    })
}

/// Create the application router
pub fn create_router(categorizer: Categorizer, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { categorizer });

    let api_routes = Router::new()
        .route("/categorize", post(categorize))
        .route("/health", get(health));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(
    categorizer: Categorizer,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    match categorizer.mode() {
        Mode::Ai => info!("✅ AI categorization enabled (ANTHROPIC_API_KEY present)"),
        Mode::Demo => {
            info!("ℹ️  Demo mode: rule-based categorization (set ANTHROPIC_API_KEY to enable AI)")
        }
    }

    let app = create_router(categorizer, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
