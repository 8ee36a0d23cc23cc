//! Deterministic keyword rule engine
//!
//! The demo-mode classifier: scans an ordered keyword table against each
//! transaction description and assigns the first matching rule's category.
//! Pure and total - no I/O, no failures, always one output per input in the
//! same order.

use crate::models::{CategorizedTransaction, Transaction};

/// A keyword categorization rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Lowercase substrings matched against the transaction description
    pub keywords: &'static [&'static str],
    pub category: &'static str,
    pub confidence: f64,
}

/// Ordered rule table. The first rule with a matching keyword wins.
///
/// Order is load-bearing: keywords overlap across rules ("gas" under
/// Transportation vs "gas bill" under Utilities), so list position is the
/// priority policy. Do not reorder or merge entries.
pub static RULES: &[Rule] = &[
    Rule {
        keywords: &["grocery", "safeway", "kroger", "whole foods", "trader"],
        category: "Groceries",
        confidence: 0.95,
    },
    Rule {
        keywords: &["restaurant", "cafe", "coffee", "starbucks", "mcdonald"],
        category: "Dining",
        confidence: 0.90,
    },
    // Matches "gas" before Utilities can see "gas bill"
    Rule {
        keywords: &["gas", "fuel", "shell", "chevron", "exxon"],
        category: "Transportation",
        confidence: 0.95,
    },
    Rule {
        keywords: &["amazon", "target", "walmart", "shopping"],
        category: "Shopping",
        confidence: 0.85,
    },
    Rule {
        keywords: &["rent", "mortgage", "apartment"],
        category: "Housing",
        confidence: 0.98,
    },
    Rule {
        keywords: &["electric", "water", "gas bill", "utility"],
        category: "Utilities",
        confidence: 0.95,
    },
    Rule {
        keywords: &["netflix", "spotify", "subscription", "membership"],
        category: "Subscriptions",
        confidence: 0.90,
    },
    Rule {
        keywords: &["salary", "payroll", "income", "deposit"],
        category: "Income",
        confidence: 0.98,
    },
    Rule {
        keywords: &["insurance", "premium"],
        category: "Insurance",
        confidence: 0.95,
    },
    Rule {
        keywords: &["phone", "internet", "cable", "verizon", "at&t"],
        category: "Telecommunications",
        confidence: 0.90,
    },
];

/// Categorize a single transaction against the rule table
fn categorize_single(transaction: &Transaction) -> CategorizedTransaction {
    let description = transaction.description.to_lowercase();

    for rule in RULES {
        if rule.keywords.iter().any(|kw| description.contains(kw)) {
            return CategorizedTransaction::new(
                transaction.clone(),
                rule.category,
                rule.confidence,
            );
        }
    }

    // Default: positive amounts look like income, everything else is noise
    if transaction.amount > 0.0 {
        CategorizedTransaction::new(transaction.clone(), "Income", 0.50)
    } else {
        CategorizedTransaction::new(transaction.clone(), "Miscellaneous", 0.50)
    }
}

/// Categorize a batch of transactions with the rule table
///
/// Output length and order always match the input.
pub fn categorize_batch(transactions: &[Transaction]) -> Vec<CategorizedTransaction> {
    transactions.iter().map(categorize_single).collect()
}
