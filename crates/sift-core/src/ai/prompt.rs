//! Prompt construction for transaction categorization
//!
//! The wording here is load-bearing: the parser expects the model to
//! answer with a bare JSON array of `{index, category, confidence,
//! reasoning}` objects, and the prompt is what asks for that shape.

use crate::models::Transaction;

/// Build the categorization prompt for a batch of transactions
///
/// Transactions are numbered from 1 in the listing, while the response
/// format indexes from 0. The model follows the example rather than the
/// listing, so reconciliation stays zero-based.
pub fn categorization_prompt(transactions: &[Transaction]) -> String {
    let lines = transactions
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {} - ${}", i + 1, t.description, t.amount))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a financial categorization AI. Categorize the following transactions with high accuracy.

Transactions:
{}

For each transaction, provide:
1. Main category (e.g., Groceries, Dining, Transportation, Housing, Utilities, etc.)
2. Confidence score (0-1)
3. Brief reasoning

Respond ONLY with a JSON array in this exact format:
[
  {{"index": 0, "category": "Groceries", "confidence": 0.95, "reasoning": "Grocery store purchase"}},
  ...
]"#,
        lines
    )
}
