//! Categorization engine
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Categorizer                          │
//! │                                                            │
//! │   batch ──► AI configured? ──no──► rule engine (demo)      │
//! │                  │yes                                      │
//! │                  ▼                                         │
//! │          prompt ► complete ► parse ► merge by index        │
//! │                  │                                         │
//! │                  └──any failure──► rule engine fallback    │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reported mode names the selected strategy, not the outcome: a
//! batch that fell back to rules mid-flight still reports `ai`, because
//! credentials were present and the AI path was attempted.

use tracing::{debug, warn};

use crate::ai::{parsing, prompt, AiBackend, AiClient};
use crate::error::Result;
use crate::models::{CategorizedBatch, CategorizedTransaction, Mode, Transaction};
use crate::rules;

/// Fallback category when the model skips a transaction
const FALLBACK_CATEGORY: &str = "Miscellaneous";

/// Fallback confidence when the model skips a transaction
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Batch categorizer selecting between AI and rule strategies
#[derive(Clone)]
pub struct Categorizer {
    ai: Option<AiClient>,
}

impl Categorizer {
    /// Create from environment, using AI when credentials are present
    pub fn from_env() -> Self {
        Self {
            ai: AiClient::from_env(),
        }
    }

    /// Create a rules-only categorizer (demo mode)
    pub fn rules_only() -> Self {
        Self { ai: None }
    }

    /// Create a categorizer backed by the given AI client
    pub fn with_client(client: AiClient) -> Self {
        Self { ai: Some(client) }
    }

    /// The strategy this categorizer was built with
    pub fn mode(&self) -> Mode {
        if self.ai.is_some() {
            Mode::Ai
        } else {
            Mode::Demo
        }
    }

    /// Categorize a batch of transactions
    ///
    /// Never fails: AI errors degrade to the rule engine and surface
    /// only as a warning in the logs.
    pub async fn categorize(&self, transactions: &[Transaction]) -> CategorizedBatch {
        let Some(client) = &self.ai else {
            return CategorizedBatch {
                transactions: rules::categorize_batch(transactions),
                mode: Mode::Demo,
            };
        };

        // Nothing to ask the model about
        if transactions.is_empty() {
            return CategorizedBatch {
                transactions: Vec::new(),
                mode: Mode::Ai,
            };
        }

        let categorized = match Self::categorize_with_ai(client, transactions).await {
            Ok(categorized) => categorized,
            Err(e) => {
                warn!(error = %e, "AI categorization failed, falling back to rules");
                rules::categorize_batch(transactions)
            }
        };

        CategorizedBatch {
            transactions: categorized,
            mode: Mode::Ai,
        }
    }

    async fn categorize_with_ai(
        client: &AiClient,
        transactions: &[Transaction],
    ) -> Result<Vec<CategorizedTransaction>> {
        let prompt = prompt::categorization_prompt(transactions);
        let response = client.complete(&prompt).await?;
        let assignments = parsing::parse_assignments(&response)?;

        debug!(
            assignments = assignments.len(),
            transactions = transactions.len(),
            "Merging AI assignments into batch"
        );

        let categorized = transactions
            .iter()
            .enumerate()
            .map(|(i, transaction)| {
                match assignments.iter().find(|a| a.index == i as i64) {
                    Some(assignment) => CategorizedTransaction::new(
                        transaction.clone(),
                        assignment.category.clone(),
                        assignment.confidence,
                    ),
                    None => CategorizedTransaction::new(
                        transaction.clone(),
                        FALLBACK_CATEGORY,
                        FALLBACK_CONFIDENCE,
                    ),
                }
            })
            .collect();

        Ok(categorized)
    }
}
