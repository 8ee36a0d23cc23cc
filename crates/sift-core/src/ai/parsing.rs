//! JSON parsing helpers for AI backend responses
//!
//! Models often wrap the JSON payload in prose or a code fence, so the
//! array is located by scanning rather than parsed from the raw text
//! directly.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One entry in the model's categorization response
///
/// `index` refers to the zero-based position of a transaction in the
/// request batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub index: i64,
    pub category: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Find the `]` that closes the `[` at byte offset `start`
///
/// Depth tracking skips over string literals so brackets inside category
/// names or reasoning text do not end the array early.
fn matching_bracket(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse category assignments from AI response
///
/// Scans for the first balanced JSON array that deserializes as a list
/// of assignments. Earlier bracketed spans that are not the payload
/// (prose like "[see below]") are skipped.
pub fn parse_assignments(response: &str) -> Result<Vec<CategoryAssignment>> {
    let response = response.trim();

    let mut last_parse_error: Option<(serde_json::Error, &str)> = None;
    let mut search_from = 0;

    while let Some(offset) = response[search_from..].find('[') {
        let start = search_from + offset;
        if let Some(end) = matching_bracket(response, start) {
            let json_str = &response[start..=end];
            match serde_json::from_str(json_str) {
                Ok(assignments) => return Ok(assignments),
                Err(e) => last_parse_error = Some((e, json_str)),
            }
        }
        search_from = start + 1;
    }

    match last_parse_error {
        Some((e, json_str)) => Err(Error::InvalidData(format!(
            "Invalid JSON from AI: {} | Raw: {}",
            e,
            truncate_for_error(json_str)
        ))),
        None => Err(Error::InvalidData(format!(
            "No JSON array found in AI response | Raw: {}",
            truncate_for_error(response)
        ))),
    }
}

/// Truncate long responses for error messages, respecting char boundaries
fn truncate_for_error(s: &str) -> String {
    if s.len() <= 200 {
        return s.to_string();
    }
    let mut end = 200;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
