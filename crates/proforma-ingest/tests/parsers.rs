use proforma_ingest::normalization::{parse_currency, parse_dose, parse_rx_count};
use proptest::prelude::*;

fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn money(cents: u64) -> String {
    format!("{}.{:02}", with_thousands(cents / 100), cents % 100)
}

#[test]
fn currency_formats_from_sheets() {
    assert_eq!(parse_currency("$1,234.56"), Some(1234.56));
    assert_eq!(parse_currency("(1,234.56)"), Some(-1234.56));
    assert_eq!(parse_currency("-1234.56"), Some(-1234.56));
    assert_eq!(parse_currency("1234.56"), Some(1234.56));
}

#[test]
fn dose_formats_from_sheets() {
    assert_eq!(parse_dose("50 MG"), Some(50.0));
    assert_eq!(parse_dose("1,000 MG"), Some(1000.0));
    assert_eq!(parse_dose("N/A"), None);
}

proptest! {
    #[test]
    fn dollar_amounts_parse_to_their_value(cents in 0u64..10_000_000_000) {
        let expected = cents as f64 / 100.0;
        let parsed = parse_currency(&format!("${}", money(cents))).unwrap();
        prop_assert!((parsed - expected).abs() < 1e-6);
    }

    #[test]
    fn parenthesized_amounts_are_negative(cents in 1u64..10_000_000_000) {
        let expected = -(cents as f64 / 100.0);
        let parsed = parse_currency(&format!("(${})", money(cents))).unwrap();
        prop_assert!((parsed - expected).abs() < 1e-6);
    }

    #[test]
    fn dose_reads_leading_magnitude(value in 0u64..100_000_000, unit in "(MG|MCG|UNIT|ML)") {
        let text = format!("{} {unit}", with_thousands(value));
        prop_assert_eq!(parse_dose(&text), Some(value as f64));
    }

    #[test]
    fn rx_count_is_never_negative(text in "\\PC{0,12}") {
        prop_assert!(parse_rx_count(&text).value() >= 0.0);
    }
}
