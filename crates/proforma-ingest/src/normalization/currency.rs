//! Currency cell parsing.
//!
//! Sheets export money as `$1,234.56`, accounting negatives as `(1,234.56)`,
//! and occasionally as plain numbers. Everything except digits, `-` and `.`
//! is discarded before parsing.

/// Parse a currency-formatted cell.
///
/// - `"$1,234.56"` → `Some(1234.56)`
/// - `"(1,234.56)"` → `Some(-1234.56)`
/// - `""`, `"$"`, `"N/A"` → `Some(0.0)` (nothing numeric left after stripping)
/// - `"1.2.3"` → `None` (numeric characters that do not form a number)
pub fn parse_currency(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let parenthesized = trimmed.contains('(') && trimmed.contains(')');

    let mut cleaned: String = trimmed
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '-' || *ch == '.')
        .collect();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    if parenthesized && !cleaned.starts_with('-') {
        cleaned.insert(0, '-');
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// True when the cell holds at least one digit.
pub fn has_digits(value: &str) -> bool {
    value.chars().any(|ch| ch.is_ascii_digit())
}
