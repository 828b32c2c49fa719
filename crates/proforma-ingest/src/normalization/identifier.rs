//! Identifier cleanup for passthrough columns.

/// Strip dashes and whitespace from an NDC; `None` when nothing is left.
pub fn normalize_ndc(value: &str) -> Option<String> {
    let cleaned: String = value
        .chars()
        .filter(|ch| *ch != '-' && !ch.is_whitespace())
        .collect();
    non_empty(cleaned)
}

/// Trimmed text, or `None` for blank cells.
pub fn normalize_text(value: &str) -> Option<String> {
    non_empty(value.trim().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
