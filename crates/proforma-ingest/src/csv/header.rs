//! Header and cell cleanup.

/// Trims a header, drops a BOM and collapses inner whitespace runs.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trims a data cell and drops a BOM.
pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Rx   Count "), "Rx Count");
        assert_eq!(normalize_header("\u{feff}Drug Name"), "Drug Name");
        assert_eq!(normalize_header("NDC"), "NDC");
    }

    #[test]
    fn test_normalize_cell() {
        assert_eq!(normalize_cell("  $12.00 "), "$12.00");
        assert_eq!(normalize_cell(""), "");
    }
}
