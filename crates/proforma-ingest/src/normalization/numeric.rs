//! Plain numeric cells (counts).

/// Parse a string value to f64.
///
/// Handles thousands separators ("1,234"), surrounding and non-breaking
/// whitespace, and scientific notation. Non-finite results are rejected.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Outcome of reading a prescription count cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RxCount {
    Parsed(f64),
    /// Negative input, clamped to 0.
    Clamped,
    /// Empty or unreadable, defaulted to 0.
    Defaulted,
}

impl RxCount {
    pub fn value(self) -> f64 {
        match self {
            RxCount::Parsed(value) => value,
            RxCount::Clamped | RxCount::Defaulted => 0.0,
        }
    }

    pub fn was_coerced(self) -> bool {
        !matches!(self, RxCount::Parsed(_))
    }
}

/// Read a prescription count. The result is never negative.
pub fn parse_rx_count(value: &str) -> RxCount {
    match parse_numeric(value) {
        Some(count) if count >= 0.0 => RxCount::Parsed(count),
        Some(_) => RxCount::Clamped,
        None => RxCount::Defaulted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_integer() {
        assert_eq!(parse_numeric("123"), Some(123.0));
        assert_eq!(parse_numeric("-456"), Some(-456.0));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(parse_numeric("1,234,567"), Some(1234567.0));
        assert_eq!(parse_numeric("1,234.56"), Some(1234.56));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_numeric("1.5E2"), Some(150.0));
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("nan"), None);
        assert_eq!(parse_numeric("inf"), None);
    }

    #[test]
    fn test_rx_count_coercion() {
        assert_eq!(parse_rx_count("12"), RxCount::Parsed(12.0));
        assert_eq!(parse_rx_count("1,200"), RxCount::Parsed(1200.0));
        assert_eq!(parse_rx_count("-3"), RxCount::Clamped);
        assert_eq!(parse_rx_count("n/a"), RxCount::Defaulted);
        assert_eq!(parse_rx_count("-3").value(), 0.0);
        assert!(parse_rx_count("").was_coerced());
        assert!(!parse_rx_count("0").was_coerced());
    }
}
