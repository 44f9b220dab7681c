use crate::core::currency::{parse_rate, CurrencyCode, CurrencyRate};
use crate::core::rate_store::RateStore;
use log::debug;

/// Code given to a freshly added row.
pub const NEW_ROW_CODE: &str = "NEW";

/// Rate given to a freshly added row.
pub const NEW_ROW_RATE: f64 = 1.0;

/// Asks the user a yes/no question.
pub trait Prompter {
    fn confirm(&mut self, title: &str, question: &str) -> bool;
}

/// Editable column of a rate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Code,
    Rate,
}

/// One row of the editor's working copy. The code is kept as typed until
/// the editor is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    code: String,
    rate: f64,
}

impl RateRow {
    /// The code as typed, not yet normalized.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// Modal editor over a working copy of the rate table.
///
/// Nothing here touches the live store: the rows are an owned copy, and
/// [`RateEditor::save_and_close`] turns them into a new [`RateStore`].
/// Dropping the editor discards every edit.
#[derive(Debug, Clone)]
pub struct RateEditor {
    rows: Vec<RateRow>,
    selected: Option<usize>,
}

impl RateEditor {
    pub fn new(store: &RateStore) -> Self {
        Self {
            rows: rows_of(store),
            selected: None,
        }
    }

    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the row at `index`. Returns false if there is no such row.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.rows.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Append a placeholder row and select it.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(RateRow {
            code: NEW_ROW_CODE.to_string(),
            rate: NEW_ROW_RATE,
        });
        let index = self.rows.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Delete the row at `index`; out-of-range indexes are ignored.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        let removed = self.rows.remove(index);
        debug!("removed row {} ({})", index, removed.code);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        true
    }

    /// Delete the selected row, if any.
    pub fn remove_selected(&mut self) -> bool {
        match self.selected {
            Some(index) => self.remove_row(index),
            None => false,
        }
    }

    /// Edit one cell. Codes are stored verbatim; a rate that does not
    /// parse as a positive number leaves the old rate in place.
    ///
    /// Returns whether the cell changed.
    pub fn edit_cell(&mut self, index: usize, field: Field, value: &str) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        match field {
            Field::Code => {
                row.code = value.to_string();
                true
            }
            Field::Rate => match parse_rate(value) {
                Some(rate) => {
                    row.rate = rate;
                    true
                }
                None => {
                    debug!("ignoring rate {:?} for row {}", value, index);
                    false
                }
            },
        }
    }

    /// Replace the working copy with the built-in rates once `prompter`
    /// confirms. Returns whether the reset happened.
    pub fn reset_to_defaults(&mut self, prompter: &mut dyn Prompter) -> bool {
        if !prompter.confirm("Confirm", "Reset to built-in default rates?") {
            return false;
        }
        self.rows = rows_of(&RateStore::defaults());
        self.selected = None;
        true
    }

    /// Normalize the rows into a store: codes trimmed and uppercased, blank
    /// codes dropped, and a repeated code overwriting the earlier one.
    pub fn save_and_close(self) -> RateStore {
        self.rows
            .into_iter()
            .filter_map(|row| {
                let Ok(code) = CurrencyCode::parse(&row.code) else {
                    debug!("dropping row with blank code");
                    return None;
                };
                match CurrencyRate::new(code, row.rate) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        debug!("dropping row: {}", e);
                        None
                    }
                }
            })
            .collect()
    }
}

fn rows_of(store: &RateStore) -> Vec<RateRow> {
    store
        .entries()
        .iter()
        .map(|e| RateRow {
            code: e.code().to_string(),
            rate: e.rate(),
        })
        .collect()
}
