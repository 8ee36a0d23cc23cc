//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sift_core::AiClient;
use tower::ServiceExt;

fn demo_app() -> Router {
    create_router(Categorizer::rules_only(), ServerConfig::default())
}

fn ai_app(response: &str) -> Router {
    create_router(
        Categorizer::with_client(AiClient::mock(response)),
        ServerConfig::default(),
    )
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_categorize(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/categorize")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

// ========== Categorize API Tests ==========

#[tokio::test]
async fn test_categorize_demo_batch() {
    let app = demo_app();

    let body = serde_json::json!({
        "transactions": [
            {"date": "2024-01-15", "description": "WHOLE FOODS MARKET #123", "amount": -82.45},
            {"date": "2024-01-16", "description": "EMPLOYER PAYROLL DEPOSIT", "amount": 2500.00}
        ]
    });

    let response = app.oneshot(post_categorize(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["mode"], "demo");

    let categorized = json["categorized"].as_array().unwrap();
    assert_eq!(categorized.len(), 2);
    assert_eq!(categorized[0]["category"], "Groceries");
    assert_eq!(categorized[0]["confidence"], 0.95);
    assert_eq!(categorized[0]["description"], "WHOLE FOODS MARKET #123");
    assert_eq!(categorized[1]["category"], "Income");
}

#[tokio::test]
async fn test_categorize_ai_batch() {
    let app = ai_app(
        r#"[
            {"index": 0, "category": "Dining", "confidence": 0.91, "reasoning": "Coffee shop"}
        ]"#,
    );

    let body = serde_json::json!({
        "transactions": [
            {"date": "2024-01-15", "description": "BLUE BOTTLE COFFEE", "amount": -6.50}
        ]
    });

    let response = app.oneshot(post_categorize(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["mode"], "ai");
    assert_eq!(json["categorized"][0]["category"], "Dining");
    assert_eq!(json["categorized"][0]["confidence"], 0.91);
}

#[tokio::test]
async fn test_categorize_ai_failure_still_reports_ai_mode() {
    let app = create_router(
        Categorizer::with_client(AiClient::mock_failing()),
        ServerConfig::default(),
    );

    let body = serde_json::json!({
        "transactions": [
            {"date": "2024-01-15", "description": "NETFLIX.COM", "amount": -15.99}
        ]
    });

    let response = app.oneshot(post_categorize(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    // Rule-engine result under the attempted-AI banner
    assert_eq!(json["mode"], "ai");
    assert_eq!(json["categorized"][0]["category"], "Subscriptions");
}

#[tokio::test]
async fn test_categorize_missing_transactions_field() {
    let app = demo_app();

    let body = serde_json::json!({"something_else": []});
    let response = app.oneshot(post_categorize(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid transactions data");
}

#[tokio::test]
async fn test_categorize_transactions_not_an_array() {
    let app = demo_app();

    let body = serde_json::json!({"transactions": "WHOLE FOODS"});
    let response = app.oneshot(post_categorize(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid transactions data");
}

#[tokio::test]
async fn test_categorize_oversized_batch() {
    let app = demo_app();

    let transactions: Vec<serde_json::Value> = (0..MAX_BATCH_SIZE + 1)
        .map(|i| {
            serde_json::json!({
                "date": "2024-01-15",
                "description": format!("MERCHANT {}", i),
                "amount": -1.00
            })
        })
        .collect();
    let body = serde_json::json!({ "transactions": transactions });

    let response = app.oneshot(post_categorize(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Batch too large"));
}

#[tokio::test]
async fn test_categorize_batch_at_limit_accepted() {
    let app = demo_app();

    let transactions: Vec<serde_json::Value> = (0..MAX_BATCH_SIZE)
        .map(|i| {
            serde_json::json!({
                "date": "2024-01-15",
                "description": format!("MERCHANT {}", i),
                "amount": -1.00
            })
        })
        .collect();
    let body = serde_json::json!({ "transactions": transactions });

    let response = app.oneshot(post_categorize(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["categorized"].as_array().unwrap().len(), MAX_BATCH_SIZE);
}

#[tokio::test]
async fn test_categorize_malformed_item_fails_whole_batch() {
    let app = demo_app();

    // Second transaction is missing its description
    let body = serde_json::json!({
        "transactions": [
            {"date": "2024-01-15", "description": "SAFEWAY 1887", "amount": -54.20},
            {"date": "2024-01-16", "amount": -10.00}
        ]
    });

    let response = app.oneshot(post_categorize(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn test_categorize_empty_batch() {
    let app = demo_app();

    let body = serde_json::json!({"transactions": []});
    let response = app.oneshot(post_categorize(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["mode"], "demo");
    assert_eq!(json["categorized"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_categorize_preserves_optional_type_field() {
    let app = demo_app();

    let body = serde_json::json!({
        "transactions": [
            {"date": "2024-01-15", "description": "SHELL OIL", "amount": -45.00, "type": "debit"}
        ]
    });

    let response = app.oneshot(post_categorize(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["categorized"][0]["type"], "debit");
    assert_eq!(json["categorized"][0]["category"], "Transportation");
}

#[tokio::test]
async fn test_categorize_rejects_non_json_body() {
    let app = demo_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/categorize")
                .header("content-type", "application/json")
                .body(Body::from("not json at all"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid transactions data");
}

#[tokio::test]
async fn test_categorize_rejects_missing_content_type() {
    let app = demo_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/categorize")
                .body(Body::from(r#"{"transactions": []}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid transactions data");
}

// ========== Health API Tests ==========

#[tokio::test]
async fn test_health_demo_mode() {
    let app = demo_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["mode"], "demo");
}

#[tokio::test]
async fn test_health_ai_mode() {
    let app = ai_app("[]");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["mode"], "ai");
}
