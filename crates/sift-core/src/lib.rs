//! Sift Core Library
//!
//! Shared functionality for the Sift transaction categorizer:
//! - Transaction and category models
//! - Deterministic keyword rule engine (demo mode)
//! - Pluggable AI backends (Claude Messages API, mock)
//! - Categorization engine with automatic rule fallback
//! - Tolerant JSON parsing for model output

pub mod ai;
pub mod engine;
pub mod error;
pub mod models;
pub mod rules;

/// Test utilities including mock Claude server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AiBackend, AiClient, CategoryAssignment, ClaudeBackend, MockBackend};
pub use engine::Categorizer;
pub use error::{Error, Result};
pub use models::{CategorizedBatch, CategorizedTransaction, Mode, Transaction};
pub use rules::{categorize_batch, Rule, RULES};
