use crate::core::currency::{CurrencyCode, CurrencyRate};
use serde::Serialize;
use std::fmt;

/// The reference currency of the built-in table.
pub const REFERENCE_CURRENCY: &str = "USD";

/// Built-in rates: 1 USD = rate. Illustrative snapshots, not live quotes.
const DEFAULT_RATES: [(&str, f64); 9] = [
    ("USD", 1.00),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 156.20),
    ("INR", 83.15),
    ("AUD", 1.54),
    ("CAD", 1.36),
    ("CHF", 0.91),
    ("CNY", 6.38),
];

/// Insertion-ordered table of exchange rates keyed by currency code.
///
/// Every rate is relative to a single reference currency. Inserting a code
/// that is already present overwrites its rate but keeps its position, so
/// the display order is the order in which codes were first seen.
///
/// # Examples
///
/// ```
/// use currency_converter::core::currency::CurrencyCode;
/// use currency_converter::core::rate_store::RateStore;
///
/// let store = RateStore::defaults();
/// assert_eq!(store.rate(&CurrencyCode::new("EUR")), Some(0.92));
/// assert_eq!(store.codes().first().map(|c| c.as_str()), Some("USD"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateStore {
    entries: Vec<CurrencyRate>,
}

impl RateStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The built-in table used when no valid rate file exists.
    pub fn defaults() -> Self {
        DEFAULT_RATES
            .iter()
            .filter_map(|(code, rate)| CurrencyRate::new(CurrencyCode::new(*code), *rate).ok())
            .collect()
    }

    /// Insert or overwrite the rate for `entry`'s code.
    pub fn insert(&mut self, entry: CurrencyRate) {
        match self.entries.iter_mut().find(|e| e.code() == entry.code()) {
            Some(existing) => existing.set_rate(entry.rate()),
            None => self.entries.push(entry),
        }
    }

    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.code() == code)
            .map(|e| e.rate())
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rate(code).is_some()
    }

    pub fn entries(&self) -> &[CurrencyRate] {
        &self.entries
    }

    /// Codes in display order.
    pub fn codes(&self) -> Vec<CurrencyCode> {
        self.entries.iter().map(|e| e.code().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether both stores hold the same code → rate pairs, ignoring order.
    pub fn same_rates(&self, other: &RateStore) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|e| other.rate(e.code()) == Some(e.rate()))
    }
}

impl FromIterator<CurrencyRate> for RateStore {
    fn from_iter<T: IntoIterator<Item = CurrencyRate>>(iter: T) -> Self {
        let mut store = Self::new();
        for entry in iter {
            store.insert(entry);
        }
        store
    }
}

impl fmt::Display for RateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Currency  Rate (1 {} = rate)", REFERENCE_CURRENCY)?;
        for entry in &self.entries {
            writeln!(f, "{:<8}  {}", entry.code().as_str(), entry.rate())?;
        }
        Ok(())
    }
}
