//! Cross-rate conversion through the reference currency.
//!
//! Rates are stored as "1 reference = rate units", so converting `amount`
//! of `from` into `to` divides by the source rate and multiplies by the
//! destination rate. No rounding is applied here; rounding is a display
//! concern.

use crate::core::currency::{CurrencyCode, RateError};
use crate::core::rate_store::RateStore;
use log::warn;

/// Rate substituted for a code that is not in the store.
pub const FALLBACK_RATE: f64 = 1.0;

/// Convert `amount` from one currency to another.
///
/// A code missing from `store` is treated as having rate 1.0, which can
/// produce a silently wrong result. Use [`convert_strict`] to get an error
/// instead.
///
/// # Examples
///
/// ```
/// use currency_converter::core::converter::convert;
/// use currency_converter::core::currency::CurrencyCode;
/// use currency_converter::core::rate_store::RateStore;
///
/// let store = RateStore::defaults();
/// let eur = convert(100.0, &CurrencyCode::new("USD"), &CurrencyCode::new("EUR"), &store);
/// assert!((eur - 92.0).abs() < 1e-9);
/// ```
pub fn convert(amount: f64, from: &CurrencyCode, to: &CurrencyCode, store: &RateStore) -> f64 {
    let from_rate = rate_or_fallback(store, from);
    let to_rate = rate_or_fallback(store, to);
    cross(amount, from_rate, to_rate)
}

/// Like [`convert`], but a code missing from `store` is an error.
pub fn convert_strict(
    amount: f64,
    from: &CurrencyCode,
    to: &CurrencyCode,
    store: &RateStore,
) -> Result<f64, RateError> {
    let from_rate = store
        .rate(from)
        .ok_or_else(|| RateError::RateNotFound(from.clone()))?;
    let to_rate = store
        .rate(to)
        .ok_or_else(|| RateError::RateNotFound(to.clone()))?;
    Ok(cross(amount, from_rate, to_rate))
}

fn rate_or_fallback(store: &RateStore, code: &CurrencyCode) -> f64 {
    store.rate(code).unwrap_or_else(|| {
        warn!("no rate for {}, using {}", code, FALLBACK_RATE);
        FALLBACK_RATE
    })
}

fn cross(amount: f64, from_rate: f64, to_rate: f64) -> f64 {
    let in_reference = amount / from_rate;
    in_reference * to_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s)
    }

    #[test]
    fn test_reference_to_other() {
        let store = RateStore::defaults();
        assert_relative_eq!(convert(100.0, &code("USD"), &code("EUR"), &store), 92.0);
    }

    #[test]
    fn test_other_to_reference() {
        let store = RateStore::defaults();
        let usd = convert(100.0, &code("EUR"), &code("USD"), &store);
        assert_relative_eq!(usd, 100.0 / 0.92);
        assert_eq!(format!("{:.2}", usd), "108.70");
    }

    #[test]
    fn test_cross_rate_between_non_reference_currencies() {
        let store = RateStore::defaults();
        let jpy = convert(10.0, &code("GBP"), &code("JPY"), &store);
        assert_relative_eq!(jpy, 10.0 / 0.79 * 156.20);
    }

    #[test]
    fn test_same_currency_is_identity() {
        let store = RateStore::defaults();
        assert_relative_eq!(convert(1234.5, &code("INR"), &code("INR"), &store), 1234.5);
    }

    #[test]
    fn test_zero_amount() {
        let store = RateStore::defaults();
        assert_eq!(convert(0.0, &code("CHF"), &code("CNY"), &store), 0.0);
    }

    #[test]
    fn test_unknown_code_falls_back_to_one() {
        let store = RateStore::defaults();
        // XYZ behaves like the reference currency
        assert_relative_eq!(convert(50.0, &code("XYZ"), &code("EUR"), &store), 46.0);
        assert_relative_eq!(convert(50.0, &code("EUR"), &code("XYZ"), &store), 50.0 / 0.92);
    }

    #[test]
    fn test_strict_rejects_unknown_code() {
        let store = RateStore::defaults();
        assert_eq!(
            convert_strict(50.0, &code("XYZ"), &code("EUR"), &store),
            Err(RateError::RateNotFound(code("XYZ")))
        );
        assert_eq!(
            convert_strict(50.0, &code("EUR"), &code("ABC"), &store),
            Err(RateError::RateNotFound(code("ABC")))
        );
        assert_relative_eq!(
            convert_strict(100.0, &code("USD"), &code("EUR"), &store).unwrap(),
            92.0
        );
    }
}
