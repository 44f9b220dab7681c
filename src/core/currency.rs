use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Short currency identifier such as `USD` or `JPY`.
///
/// Codes entered by a user go through [`CurrencyCode::parse`], which trims
/// and uppercases them, so `" eur "` and `"EUR"` name the same currency.
///
/// # Examples
///
/// ```
/// use currency_converter::core::currency::CurrencyCode;
///
/// let eur = CurrencyCode::parse(" eur ").unwrap();
/// assert_eq!(eur, CurrencyCode::new("EUR"));
/// assert!(CurrencyCode::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Wrap an already-normalized code. Prefer [`CurrencyCode::parse`] for
    /// anything typed by a user.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Normalize raw text into a code: trim, then uppercase.
    pub fn parse(raw: &str) -> Result<Self, RateError> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() {
            return Err(RateError::EmptyCode);
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from currency codes and rates.
#[derive(Debug, Error, PartialEq)]
pub enum RateError {
    #[error("currency code must not be empty")]
    EmptyCode,
    #[error("rate must be a positive number, got {rate} for {code}")]
    InvalidRate { code: CurrencyCode, rate: f64 },
    #[error("no rate available for {0}")]
    RateNotFound(CurrencyCode),
}

/// One row of the rate table: 1 unit of the reference currency equals
/// `rate` units of `code`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRate {
    code: CurrencyCode,
    rate: f64,
}

impl CurrencyRate {
    /// Create a rate entry, rejecting zero, negative and non-finite rates.
    pub fn new(code: CurrencyCode, rate: f64) -> Result<Self, RateError> {
        if !is_valid_rate(rate) {
            return Err(RateError::InvalidRate { code, rate });
        }
        Ok(Self { code, rate })
    }

    pub fn code(&self) -> &CurrencyCode {
        &self.code
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub(crate) fn set_rate(&mut self, rate: f64) {
        debug_assert!(is_valid_rate(rate));
        self.rate = rate;
    }
}

impl fmt::Display for CurrencyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.code, self.rate)
    }
}

/// Whether `rate` can be stored: finite and strictly positive.
pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Parse user or file text as a storable rate.
pub fn parse_rate(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|rate| is_valid_rate(*rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("USD");
        let b = CurrencyCode::new("USD");
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(CurrencyCode::parse("  chf\t").unwrap().as_str(), "CHF");
    }

    #[test]
    fn test_parse_rejects_blank_code() {
        assert_eq!(CurrencyCode::parse(""), Err(RateError::EmptyCode));
        assert_eq!(CurrencyCode::parse(" \t "), Err(RateError::EmptyCode));
    }

    #[test]
    fn test_rate_must_be_positive() {
        let usd = CurrencyCode::new("USD");
        assert!(CurrencyRate::new(usd.clone(), 0.0).is_err());
        assert!(CurrencyRate::new(usd.clone(), -1.5).is_err());
        assert!(CurrencyRate::new(usd.clone(), f64::NAN).is_err());
        assert!(CurrencyRate::new(usd.clone(), f64::INFINITY).is_err());
        assert_eq!(CurrencyRate::new(usd, 1.0).unwrap().rate(), 1.0);
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate(" 0.92 "), Some(0.92));
        assert_eq!(parse_rate("1e2"), Some(100.0));
        assert_eq!(parse_rate("abc"), None);
        assert_eq!(parse_rate("0"), None);
        assert_eq!(parse_rate("-3"), None);
        assert_eq!(parse_rate("NaN"), None);
    }

    #[test]
    fn test_rate_display() {
        let rate = CurrencyRate::new(CurrencyCode::new("EUR"), 0.92).unwrap();
        assert_eq!(rate.to_string(), "EUR=0.92");
    }
}
