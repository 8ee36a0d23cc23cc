//! Domain models for Sift

use serde::{Deserialize, Serialize};

/// A financial transaction submitted for categorization
///
/// Inputs are never mutated by the engine; categorization produces a fresh
/// [`CategorizedTransaction`] carrying a copy of these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Caller-supplied date string, passed through without validation
    pub date: String,
    /// Free-text description (bank statement line)
    pub description: String,
    /// Negative = expense, positive = income
    pub amount: f64,
    /// Optional caller-supplied type tag, echoed back untouched
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A transaction annotated with a category and confidence score
///
/// The original transaction fields are flattened on the wire, so the JSON
/// shape is `{date, description, amount, type?, category, confidence}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: String,
    /// Confidence score in [0, 1]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

impl CategorizedTransaction {
    /// Annotate a transaction with a category and confidence
    pub fn new(transaction: Transaction, category: impl Into<String>, confidence: f64) -> Self {
        Self {
            transaction,
            category: category.into(),
            confidence,
            subcategory: None,
        }
    }
}

/// Which categorization strategy was selected for a batch
///
/// Mode reflects credential presence, not whether the AI call succeeded:
/// a batch categorized by the rule fallback after a Claude failure still
/// reports `Ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Deterministic keyword rules (no API key configured)
    Demo,
    /// Claude-backed categorization
    Ai,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Ai => "ai",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "ai" => Ok(Self::Ai),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully categorized batch with the strategy that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedBatch {
    pub transactions: Vec<CategorizedTransaction>,
    pub mode: Mode,
}
