//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categorize` - Categorize transactions from a file (CSV or JSON)
//! - `rules` - Show the demo-mode keyword rule table
//! - `serve` - Web server command

pub mod categorize;
pub mod rules;
pub mod serve;

// Re-export command functions for main.rs
pub use categorize::*;
pub use rules::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
