//! # currency-converter
//!
//! Converts amounts between currencies using a small, user-editable table
//! of exchange rates, each expressed relative to one reference currency.
//!
//! ## Architecture
//!
//! - **core** — Currency codes, the rate store and the converter
//! - **persistence** — Reading and writing the per-user rate file
//! - **app** — Toolkit-free state of the main view and the rate editor
//! - **ui** — Terminal front end that dispatches user commands to **app**
//! - **config** — Where the rate file lives

pub mod app;
pub mod config;
pub mod core;
pub mod persistence;
pub mod ui;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::app::main_view::{Conversion, MainView, ViewError};
    pub use crate::app::rate_editor::{Field, Prompter, RateEditor, RateRow};
    pub use crate::config::Config;
    pub use crate::core::converter::{convert, convert_strict};
    pub use crate::core::currency::{CurrencyCode, CurrencyRate, RateError};
    pub use crate::core::rate_store::RateStore;
    pub use crate::persistence::{PersistenceError, RateFile, RateRepository};
}
