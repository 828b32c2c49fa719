//! Dose strength and unit-of-measure extraction.

use std::sync::LazyLock;

use regex::Regex;

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d[\d,]*(?:\.\d+)?|\.\d+").expect("numeric token pattern is valid")
});

/// First contiguous numeric token of `value`, thousands separators removed.
pub fn first_numeric_token(value: &str) -> Option<f64> {
    let token = NUMERIC_TOKEN.find(value)?;
    token
        .as_str()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Dose magnitude from strength text; the unit suffix is discarded.
///
/// `"50 MG"` → `Some(50.0)`, `"1,000 MG"` → `Some(1000.0)`, `"N/A"` → `None`.
pub fn parse_dose(strength: &str) -> Option<f64> {
    first_numeric_token(strength)
}

/// Units per package from a descriptive unit string.
///
/// Absent, zero or unreadable values fall back to 1 so later division is safe.
pub fn parse_unit_of_measure(value: &str) -> f64 {
    match first_numeric_token(value) {
        Some(units) if units > 0.0 => units,
        _ => 1.0,
    }
}
