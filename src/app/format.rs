//! Amount input parsing and display formatting.

use crate::app::main_view::ViewError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Parse the amount field. Commas are thousands separators and are
/// dropped before parsing; the amount must be a finite, non-negative
/// number.
pub fn parse_amount(text: &str) -> Result<f64, ViewError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ViewError::AmountRequired);
    }
    let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
    match digits.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(ViewError::InvalidNumber(trimmed.to_string())),
    }
}

/// Format `value` as `#,##0.00`: two decimals rounded half-to-even, with
/// `,` between groups of three integer digits.
///
/// Rounding works on the exact binary value, so `1.015` (stored just below
/// the tie) shows as `1.01`.
///
/// ```
/// use currency_converter::app::format::format_amount;
///
/// assert_eq!(format_amount(1234.5), "1,234.50");
/// assert_eq!(format_amount(0.125), "0.12");
/// ```
pub fn format_amount(value: f64) -> String {
    let fixed = match Decimal::from_f64_retain(value) {
        Some(d) => format!(
            "{:.2}",
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        ),
        // outside Decimal's range
        None => format!("{:.2}", value),
    };
    group_thousands(&fixed)
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
