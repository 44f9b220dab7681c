use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the rate file location.
pub const RATES_FILE_ENV: &str = "CURRENCY_RATES_FILE";

const RATES_FILE_NAME: &str = ".currency_rates.properties";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Location of the persisted rate table.
    pub rates_file: PathBuf,
}

fn default_rates_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(RATES_FILE_NAME)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_file: default_rates_file(),
        }
    }
}

impl Config {
    /// Resolve the configuration: an explicit path wins, then the
    /// environment, then the per-user default.
    pub fn load(rates_file: Option<&Path>) -> Self {
        if let Some(path) = rates_file {
            return Self {
                rates_file: path.to_path_buf(),
            };
        }
        Self::from_env_value(env::var_os(RATES_FILE_ENV).map(PathBuf::from))
    }

    fn from_env_value(value: Option<PathBuf>) -> Self {
        match value.filter(|p| !p.as_os_str().is_empty()) {
            Some(rates_file) => Self { rates_file },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        let config = Config::default();
        assert!(config.rates_file.ends_with(RATES_FILE_NAME));
    }

    #[test]
    fn test_explicit_path_wins() {
        let config = Config::load(Some(Path::new("/tmp/my-rates.properties")));
        assert_eq!(config.rates_file, PathBuf::from("/tmp/my-rates.properties"));
    }

    #[test]
    fn test_env_value() {
        let config = Config::from_env_value(Some(PathBuf::from("/srv/rates.properties")));
        assert_eq!(config.rates_file, PathBuf::from("/srv/rates.properties"));
    }

    #[test]
    fn test_empty_env_value_uses_default() {
        assert_eq!(Config::from_env_value(Some(PathBuf::new())), Config::default());
        assert_eq!(Config::from_env_value(None), Config::default());
    }
}
