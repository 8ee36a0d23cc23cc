//! Rule table command implementation

use anyhow::Result;
use sift_core::RULES;

pub fn cmd_rules() -> Result<()> {
    println!();
    println!(
        "📝 Demo-Mode Keyword Rules ({} rules, first match wins)",
        RULES.len()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for (i, rule) in RULES.iter().enumerate() {
        println!(
            "   {:>2}. {:<18} {:>3.0}%  {}",
            i + 1,
            rule.category,
            rule.confidence * 100.0,
            rule.keywords.join(", ")
        );
    }

    println!();
    println!("   Unmatched transactions default to Income (positive amounts)");
    println!("   or Miscellaneous (everything else) at 50% confidence.");

    Ok(())
}
