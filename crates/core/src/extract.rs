//! Scrapes the JSON object out of a model response.
//!
//! Generation prompts ask for a single JSON object, but providers routinely
//! wrap it in prose or a markdown fence. A fenced ```json block wins when
//! present (even if its payload later fails to parse); otherwise the span
//! opened by the first `{` is taken up to its matching close, tracking
//! string literals and escapes so braces inside values don't desync the
//! scan.

use std::sync::LazyLock;

use regex::Regex;

const FENCED_JSON_PATTERN: &str = r"(?s)```json\n?(.*?)\n?```";

static FENCED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FENCED_JSON_PATTERN).expect("valid regex"));

/// Returns the JSON object embedded in `text`, or `None` when no fenced
/// block and no balanced `{...}` span exists. Callers parse the slice and
/// treat `None` the same as a parse failure.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(caps) = FENCED_JSON_RE.captures(text) {
        if let Some(m) = caps.get(1) {
            return Some(m.as_str().trim());
        }
    }
    balanced_object(text)
}

fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
