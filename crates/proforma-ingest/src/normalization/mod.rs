//! Cell-level normalization for profitability sheets.
//!
//! - **currency**: `$`/comma/parenthesis money formats
//! - **dose**: strength text and unit-of-measure magnitudes
//! - **numeric**: plain counts
//! - **identifier**: NDC and free-text passthrough columns
//!
//! None of these functions fail; callers decide which neutral value an
//! unreadable cell becomes and record it in the coercion report.

pub mod currency;
pub mod dose;
pub mod identifier;
pub mod numeric;

pub use currency::{has_digits, parse_currency};
pub use dose::{first_numeric_token, parse_dose, parse_unit_of_measure};
pub use identifier::{normalize_ndc, normalize_text};
pub use numeric::{RxCount, parse_numeric, parse_rx_count};
