//! Loading and saving the rate table.
//!
//! The rate file is a plain properties file with one `CODE=rate` line per
//! currency. Reading is best-effort: anything unusable falls back to the
//! built-in defaults. Writing reports its failure to the caller.

pub mod properties;

use crate::core::currency::{parse_rate, CurrencyCode, CurrencyRate};
use crate::core::rate_store::{RateStore, REFERENCE_CURRENCY};
use chrono::Utc;
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors arising from writing the rate file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the live rate table is loaded from and saved to.
pub trait RateRepository {
    /// Load the persisted table, or the defaults when there is none.
    fn load(&self) -> RateStore;

    /// Persist `store`. The caller's store is left untouched on failure.
    fn save(&self, store: &RateStore) -> Result<(), PersistenceError>;
}

/// Rate table stored as a properties file on disk.
#[derive(Debug, Clone)]
pub struct RateFile {
    path: PathBuf,
}

impl RateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateRepository for RateFile {
    fn load(&self) -> RateStore {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no rate file at {}, using defaults", self.path.display());
                return RateStore::defaults();
            }
            Err(e) => {
                warn!("cannot read {}: {}, using defaults", self.path.display(), e);
                return RateStore::defaults();
            }
        };

        let loaded = parse_rates(&String::from_utf8_lossy(&bytes));
        if loaded.is_empty() {
            info!("{} has no valid rates, using defaults", self.path.display());
            return RateStore::defaults();
        }
        info!("loaded {} rates from {}", loaded.len(), self.path.display());
        loaded
    }

    fn save(&self, store: &RateStore) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| PersistenceError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, render_rates(store)).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("saved {} rates to {}", store.len(), self.path.display());
        Ok(())
    }
}

/// Parse rate file text. Lines whose value is not a positive number, or
/// whose code is blank, are skipped. A repeated code overwrites the
/// earlier rate. The result may be empty.
pub fn parse_rates(text: &str) -> RateStore {
    let mut store = RateStore::new();
    for (key, value) in properties::parse(text) {
        let Ok(code) = CurrencyCode::parse(&key) else {
            debug!("skipping rate line with blank code");
            continue;
        };
        let Some(rate) = parse_rate(&value) else {
            debug!("skipping {}: {:?} is not a positive number", code, value);
            continue;
        };
        if let Ok(entry) = CurrencyRate::new(code, rate) {
            store.insert(entry);
        }
    }
    store
}

/// Render `store` as rate file text, in store order, with full precision.
pub fn render_rates(store: &RateStore) -> String {
    let mut out = format!("#Currency rates (1 {} = rate)\n", REFERENCE_CURRENCY);
    out.push_str(&format!(
        "#{}\n",
        Utc::now().format("%a %b %d %H:%M:%S UTC %Y")
    ));
    for entry in store.entries() {
        out.push_str(&properties::format_pair(
            entry.code().as_str(),
            &format_rate(entry.rate()),
        ));
        out.push('\n');
    }
    out
}

/// Shortest text that parses back to exactly `rate`, always with a
/// fractional part.
fn format_rate(rate: f64) -> String {
    let mut text = rate.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(code: &str, rate: f64) -> CurrencyRate {
        CurrencyRate::new(CurrencyCode::new(code), rate).unwrap()
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(1.0), "1.0");
        assert_eq!(format_rate(156.2), "156.2");
        assert_eq!(format_rate(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_parse_rates_skips_bad_lines() {
        let store = parse_rates("USD=1.0\nEUR=abc\nGBP=-0.79\n=5\nJPY=0\nchf = 0.91\n");
        assert_eq!(store.codes(), vec![CurrencyCode::new("USD"), CurrencyCode::new("CHF")]);
        assert_eq!(store.rate(&CurrencyCode::new("CHF")), Some(0.91));
    }

    #[test]
    fn test_parse_rates_last_duplicate_wins() {
        let store = parse_rates("EUR=0.90\nUSD=1\neur=0.95\n");
        assert_eq!(store.len(), 2);
        assert_eq!(store.rate(&CurrencyCode::new("EUR")), Some(0.95));
        assert_eq!(store.codes()[0], CurrencyCode::new("EUR"));
    }

    #[test]
    fn test_render_rates() {
        let store: RateStore = vec![entry("USD", 1.0), entry("JPY", 156.2)].into_iter().collect();
        let text = render_rates(&store);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#Currency rates (1 USD = rate)");
        assert!(lines[1].starts_with('#'));
        assert_eq!(&lines[2..], ["USD=1.0", "JPY=156.2"]);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let file = RateFile::new(dir.path().join("absent.properties"));
        assert_eq!(file.load(), RateStore::defaults());
    }

    #[test]
    fn test_directory_path_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let file = RateFile::new(dir.path());
        assert_eq!(file.load(), RateStore::defaults());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let file = RateFile::new(dir.path().join("rates.properties"));
        let store: RateStore = vec![entry("USD", 1.0), entry("BRL", 5.0312), entry("EUR", 0.9)]
            .into_iter()
            .collect();

        file.save(&store).unwrap();
        assert_eq!(file.load(), store);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let file = RateFile::new(dir.path().join("nested").join("deeper").join("rates.properties"));
        file.save(&RateStore::defaults()).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let file = RateFile::new(blocker.join("rates.properties"));

        let err = file.save(&RateStore::defaults()).unwrap_err();
        assert!(matches!(err, PersistenceError::CreateDir { .. }));
    }
}
