//! Categorize command implementation

use std::path::Path;

use anyhow::{Context, Result};
use sift_core::{Categorizer, Mode, Transaction};

use super::truncate;

/// Load transactions from a CSV or JSON file, dispatching on extension
///
/// CSV files need a `date,description,amount` header row with an optional
/// `type` column. JSON files hold an array of transaction objects in the
/// same shape the API accepts.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => load_csv(path),
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => anyhow::bail!(
            "Unsupported file format (use .csv or .json): {}",
            path.display()
        ),
    }
}

fn load_csv(path: &Path) -> Result<Vec<Transaction>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut transactions = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        // Header occupies line 1
        let tx: Transaction = row.with_context(|| format!("Invalid transaction on line {}", i + 2))?;
        transactions.push(tx);
    }

    Ok(transactions)
}

fn load_json(path: &Path) -> Result<Vec<Transaction>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid transaction JSON in {}", path.display()))
}

pub async fn cmd_categorize(categorizer: &Categorizer, file: &Path, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    tracing::debug!(
        "Loaded {} transactions from {}",
        transactions.len(),
        file.display()
    );

    if transactions.is_empty() {
        println!("No transactions found in {}", file.display());
        return Ok(());
    }

    let batch = categorizer.categorize(&transactions).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    match batch.mode {
        Mode::Ai => println!(
            "✅ Categorized {} transactions with Claude",
            batch.transactions.len()
        ),
        Mode::Demo => println!(
            "ℹ️  Categorized {} transactions with keyword rules (set ANTHROPIC_API_KEY for AI)",
            batch.transactions.len()
        ),
    }

    println!();
    println!("📝 Categorized Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for item in &batch.transactions {
        let tx = &item.transaction;
        let amount_str = if tx.amount < 0.0 {
            format!("\x1b[31m${:.2}\x1b[0m", tx.amount.abs()) // Red for expenses
        } else {
            format!("\x1b[32m+${:.2}\x1b[0m", tx.amount) // Green for income
        };

        println!(
            "   {} │ {:>10} │ {:<40} │ {} ({:.0}%)",
            tx.date,
            amount_str,
            truncate(&tx.description, 40),
            item.category,
            item.confidence * 100.0
        );
    }

    Ok(())
}
