use crate::app::format::{format_amount, parse_amount};
use crate::app::rate_editor::RateEditor;
use crate::core::converter::convert;
use crate::core::currency::CurrencyCode;
use crate::core::rate_store::RateStore;
use crate::persistence::{PersistenceError, RateRepository};
use log::{debug, info};
use std::fmt;
use thiserror::Error;

const PREFERRED_FROM: &str = "USD";
const PREFERRED_TO: &str = "EUR";

/// User input problems reported by the main view. None of them change
/// any state.
#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("Please enter an amount.")]
    AmountRequired,
    #[error("Please enter a valid number (e.g. 1234.56).")]
    InvalidNumber(String),
    #[error("No currencies are configured. Add some under Manage Rates.")]
    NoCurrencies,
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl ViewError {
    /// Dialog title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            ViewError::AmountRequired => "Input required",
            ViewError::InvalidNumber(_) => "Invalid number",
            ViewError::NoCurrencies => "No currencies",
            ViewError::UnknownCurrency(_) => "Unknown currency",
        }
    }

    /// Whether the dialog is a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, ViewError::AmountRequired)
    }
}

/// A displayed conversion result.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// Unrounded converted amount.
    pub result: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} → {} {}",
            format_amount(self.amount),
            self.from,
            format_amount(self.result),
            self.to
        )
    }
}

/// Whether a result is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Converted,
}

/// State of the converter form: amount text, the two currency selections,
/// the last result, and the live rate store it converts with.
///
/// A result stays on screen until the next convert or clear; editing the
/// amount or the selections does not invalidate it.
#[derive(Debug, Clone)]
pub struct MainView {
    store: RateStore,
    amount_text: String,
    from: Option<CurrencyCode>,
    to: Option<CurrencyCode>,
    result: Option<Conversion>,
}

impl MainView {
    /// Build the form over `store`, selecting USD → EUR when available and
    /// the first listed currency otherwise.
    pub fn new(store: RateStore) -> Self {
        let from = preferred_or_first(&store, PREFERRED_FROM);
        let to = preferred_or_first(&store, PREFERRED_TO);
        Self {
            store,
            amount_text: String::new(),
            from,
            to,
            result: None,
        }
    }

    pub fn store(&self) -> &RateStore {
        &self.store
    }

    /// Currencies offered by both selectors, in display order.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        self.store.codes()
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn set_amount_text(&mut self, text: impl Into<String>) {
        self.amount_text = text.into();
    }

    pub fn from(&self) -> Option<&CurrencyCode> {
        self.from.as_ref()
    }

    pub fn to(&self) -> Option<&CurrencyCode> {
        self.to.as_ref()
    }

    pub fn select_from(&mut self, raw: &str) -> Result<(), ViewError> {
        self.from = Some(self.offered(raw)?);
        Ok(())
    }

    pub fn select_to(&mut self, raw: &str) -> Result<(), ViewError> {
        self.to = Some(self.offered(raw)?);
        Ok(())
    }

    pub fn result(&self) -> Option<&Conversion> {
        self.result.as_ref()
    }

    pub fn state(&self) -> ViewState {
        match self.result {
            Some(_) => ViewState::Converted,
            None => ViewState::Idle,
        }
    }

    /// Convert the entered amount between the selected currencies.
    pub fn convert(&mut self) -> Result<&Conversion, ViewError> {
        let amount = parse_amount(&self.amount_text)?;
        let (Some(from), Some(to)) = (self.from.clone(), self.to.clone()) else {
            return Err(ViewError::NoCurrencies);
        };
        let result = convert(amount, &from, &to, &self.store);
        debug!("converted {} {} to {} {}", amount, from, result, to);
        Ok(&*self.result.insert(Conversion {
            amount,
            from,
            to,
            result,
        }))
    }

    /// Empty the amount field and the result. Rates are untouched.
    pub fn clear(&mut self) {
        self.amount_text.clear();
        self.result = None;
    }

    /// Exchange the source and destination selections.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// Start editing a detached working copy of the live rates.
    pub fn open_rate_editor(&self) -> RateEditor {
        RateEditor::new(&self.store)
    }

    /// Commit `editor` into the live store, refresh the selectors, then
    /// persist through `repository`.
    ///
    /// The live store is replaced before persisting, so a save failure is
    /// returned but does not roll the in-memory rates back.
    pub fn apply_rate_editor(
        &mut self,
        editor: RateEditor,
        repository: &dyn RateRepository,
    ) -> Result<(), PersistenceError> {
        self.store = editor.save_and_close();
        self.refresh_selection();
        info!("rate table updated: {} currencies", self.store.len());
        repository.save(&self.store)
    }

    fn refresh_selection(&mut self) {
        let first = self.store.codes().into_iter().next();
        let keep = |selected: Option<CurrencyCode>, store: &RateStore| {
            selected
                .filter(|code| store.contains(code))
                .or_else(|| first.clone())
        };
        self.from = keep(self.from.take(), &self.store);
        self.to = keep(self.to.take(), &self.store);
    }

    fn offered(&self, raw: &str) -> Result<CurrencyCode, ViewError> {
        CurrencyCode::parse(raw)
            .ok()
            .filter(|code| self.store.contains(code))
            .ok_or_else(|| ViewError::UnknownCurrency(raw.trim().to_string()))
    }
}

fn preferred_or_first(store: &RateStore, preferred: &str) -> Option<CurrencyCode> {
    let preferred = CurrencyCode::new(preferred);
    if store.contains(&preferred) {
        Some(preferred)
    } else {
        store.codes().into_iter().next()
    }
}
