//! Integration tests for sift-core
//!
//! These tests exercise the full prompt → completion → parse → merge
//! workflow through the public API.

use sift_core::{categorize_batch, AiClient, Categorizer, Mode, Transaction};

/// Helper to build a realistic mixed batch:
/// - 2 expenses matched by rule keywords (groceries, fuel)
/// - 1 income deposit
/// - 1 merchant no rule knows about
fn mixed_batch() -> Vec<Transaction> {
    vec![
        Transaction {
            date: "2024-01-15".to_string(),
            description: "WHOLE FOODS MARKET #123".to_string(),
            amount: -82.45,
            kind: Some("debit".to_string()),
        },
        Transaction {
            date: "2024-01-16".to_string(),
            description: "SHELL OIL 57442991".to_string(),
            amount: -45.00,
            kind: Some("debit".to_string()),
        },
        Transaction {
            date: "2024-01-17".to_string(),
            description: "EMPLOYER PAYROLL DEPOSIT".to_string(),
            amount: 2500.00,
            kind: Some("credit".to_string()),
        },
        Transaction {
            date: "2024-01-18".to_string(),
            description: "XYZ HOLDINGS 44-A".to_string(),
            amount: -12.99,
            kind: None,
        },
    ]
}

// =============================================================================
// Demo Mode (rule engine) Workflows
// =============================================================================

#[tokio::test]
async fn test_demo_workflow() {
    let categorizer = Categorizer::rules_only();
    let transactions = mixed_batch();

    let batch = categorizer.categorize(&transactions).await;

    assert_eq!(batch.mode, Mode::Demo);
    assert_eq!(batch.transactions.len(), 4);
    assert_eq!(batch.transactions[0].category, "Groceries");
    assert_eq!(batch.transactions[1].category, "Transportation");
    assert_eq!(batch.transactions[2].category, "Income");
    // Unknown expense lands in the default bucket
    assert_eq!(batch.transactions[3].category, "Miscellaneous");
    assert_eq!(batch.transactions[3].confidence, 0.5);

    // Every original transaction survives unchanged, in order
    for (categorized, original) in batch.transactions.iter().zip(&transactions) {
        assert_eq!(&categorized.transaction, original);
    }
}

#[tokio::test]
async fn test_demo_workflow_empty_batch() {
    let batch = Categorizer::rules_only().categorize(&[]).await;
    assert_eq!(batch.mode, Mode::Demo);
    assert!(batch.transactions.is_empty());
}

// =============================================================================
// AI Mode Workflows
// =============================================================================

#[tokio::test]
async fn test_full_ai_workflow() {
    let response = r#"Here are the categorized transactions:

[
  {"index": 0, "category": "Groceries", "confidence": 0.97, "reasoning": "Supermarket chain"},
  {"index": 1, "category": "Transportation", "confidence": 0.96, "reasoning": "Gas station"},
  {"index": 2, "category": "Income", "confidence": 0.99, "reasoning": "Payroll deposit"},
  {"index": 3, "category": "Entertainment", "confidence": 0.62, "reasoning": "Possibly a venue"}
]"#;
    let categorizer = Categorizer::with_client(AiClient::mock(response));
    let transactions = mixed_batch();

    let batch = categorizer.categorize(&transactions).await;

    assert_eq!(batch.mode, Mode::Ai);
    assert_eq!(batch.transactions.len(), 4);
    assert_eq!(batch.transactions[0].category, "Groceries");
    assert_eq!(batch.transactions[0].confidence, 0.97);
    // The model can answer with categories no rule produces
    assert_eq!(batch.transactions[3].category, "Entertainment");
    assert_eq!(batch.transactions[3].confidence, 0.62);
}

#[tokio::test]
async fn test_ai_workflow_partial_answer() {
    // Model only answered for half the batch
    let response = r#"[
  {"index": 1, "category": "Transportation", "confidence": 0.96},
  {"index": 2, "category": "Income", "confidence": 0.99}
]"#;
    let categorizer = Categorizer::with_client(AiClient::mock(response));

    let batch = categorizer.categorize(&mixed_batch()).await;

    assert_eq!(batch.transactions[0].category, "Miscellaneous");
    assert_eq!(batch.transactions[0].confidence, 0.5);
    assert_eq!(batch.transactions[1].category, "Transportation");
    assert_eq!(batch.transactions[2].category, "Income");
    assert_eq!(batch.transactions[3].category, "Miscellaneous");
}

#[tokio::test]
async fn test_ai_workflow_code_fenced_response() {
    let response = "```json\n[{\"index\": 0, \"category\": \"Groceries\", \"confidence\": 0.95}]\n```";
    let categorizer = Categorizer::with_client(AiClient::mock(response));

    let batch = categorizer
        .categorize(&mixed_batch()[..1])
        .await;

    assert_eq!(batch.mode, Mode::Ai);
    assert_eq!(batch.transactions[0].category, "Groceries");
}

// =============================================================================
// Fallback Workflows
// =============================================================================

#[tokio::test]
async fn test_ai_failure_falls_back_to_rules() {
    let categorizer = Categorizer::with_client(AiClient::mock_failing());
    let transactions = mixed_batch();

    let batch = categorizer.categorize(&transactions).await;

    // Mode still reports the attempted strategy
    assert_eq!(batch.mode, Mode::Ai);
    assert_eq!(batch.transactions, categorize_batch(&transactions));
}

#[tokio::test]
async fn test_unparseable_ai_answer_falls_back_to_rules() {
    let categorizer = Categorizer::with_client(AiClient::mock(
        "I'm unable to produce structured output for this request.",
    ));
    let transactions = mixed_batch();

    let batch = categorizer.categorize(&transactions).await;

    assert_eq!(batch.mode, Mode::Ai);
    assert_eq!(batch.transactions, categorize_batch(&transactions));
    assert_eq!(batch.transactions[0].category, "Groceries");
    assert_eq!(batch.transactions[2].category, "Income");
}
