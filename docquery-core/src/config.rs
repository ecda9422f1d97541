//! Configuration for the query translator.
//!
//! Settings can be built programmatically or loaded from a TOML file:
//!
//! ```toml
//! [translator]
//! default_page_size = 30
//! ```
//!
//! [`AppConfig::load`] reads `.env` (if present), then loads the file named by
//! `DOCQUERY_CONFIG`, falling back to `./docquery.toml`, and finally to the
//! built-in defaults. `DOCQUERY_PAGE_SIZE` overrides the page size from any source.
//!
//! The page size is a [`NonZeroU64`]: a zero page size is rejected wherever it
//! comes from, since document stores read a zero limit as "no limit".

use serde::{Deserialize, Serialize};
use std::{env, num::NonZeroU64, path::Path};
use thiserror::Error;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "./docquery.toml";
const CONFIG_PATH_VAR: &str = "DOCQUERY_CONFIG";
const PAGE_SIZE_VAR: &str = "DOCQUERY_PAGE_SIZE";

/// Page size applied when a request does not carry a usable `limit`.
pub const DEFAULT_PAGE_SIZE: NonZeroU64 = NonZeroU64::new(30).unwrap();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub translator: TranslatorConfig,
}

/// Query translator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: NonZeroU64,
}

fn default_page_size() -> NonZeroU64 {
    DEFAULT_PAGE_SIZE
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self { default_page_size: DEFAULT_PAGE_SIZE }
    }
}

impl TranslatorConfig {
    /// Creates a configuration, rejecting a zero page size.
    pub fn new(default_page_size: u64) -> Result<Self, ConfigError> {
        let default_page_size = NonZeroU64::new(default_page_size).ok_or_else(|| {
            ConfigError::Invalid("Translator default_page_size must be greater than 0".to_string())
        })?;

        Ok(Self { default_page_size })
    }
}

impl AppConfig {
    /// Load configuration from the environment, a TOML file, or defaults
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }

        Self::load_with(|key| env::var(key).ok())
    }

    /// Load configuration using `lookup` to read environment variables
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if let Some(config_path) = lookup(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };

        if let Some(page_size) = lookup(PAGE_SIZE_VAR) {
            config.translator.default_page_size = page_size.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{PAGE_SIZE_VAR} must be a positive integer, got {page_size:?}"))
            })?;
        }

        info!(
            default_page_size = config.translator.default_page_size.get(),
            "loaded translator configuration"
        );
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, io::Write};

    fn page_size_file(page_size: u64) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[translator]").unwrap();
        writeln!(file, "default_page_size = {page_size}").unwrap();
        file
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_use_the_standard_page_size() {
        assert_eq!(AppConfig::default().translator.default_page_size.get(), 30);
    }

    #[test]
    fn new_rejects_zero_page_size() {
        let err = TranslatorConfig::new(0).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(TranslatorConfig::new(12).unwrap().default_page_size.get(), 12);
    }

    #[test]
    fn parses_translator_section() {
        let config = AppConfig::from_toml_str("[translator]\ndefault_page_size = 50\n").unwrap();

        assert_eq!(config.translator, TranslatorConfig::new(50).unwrap());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
        assert_eq!(
            AppConfig::from_toml_str("[translator]\n").unwrap(),
            AppConfig::default()
        );
    }

    #[test]
    fn rejects_zero_page_size_in_toml() {
        let err = AppConfig::from_toml_str("[translator]\ndefault_page_size = 0\n").unwrap_err();

        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = AppConfig::from_toml_str("[translator\n").unwrap_err();

        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn loads_from_file() {
        let file = page_size_file(15);

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.translator.default_page_size.get(), 15);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_reads_config_path_variable() {
        let file = page_size_file(40);
        let path = file.path().to_string_lossy().into_owned();

        let config = AppConfig::load_with(lookup(&[(CONFIG_PATH_VAR, &path)])).unwrap();

        assert_eq!(config.translator.default_page_size.get(), 40);
    }

    #[test]
    fn load_fails_on_missing_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml").to_string_lossy().into_owned();

        let err = AppConfig::load_with(lookup(&[(CONFIG_PATH_VAR, &path)])).unwrap_err();

        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn page_size_variable_overrides_file() {
        let file = page_size_file(40);
        let path = file.path().to_string_lossy().into_owned();

        let config = AppConfig::load_with(lookup(&[
            (CONFIG_PATH_VAR, &path),
            (PAGE_SIZE_VAR, " 25 "),
        ]))
        .unwrap();

        assert_eq!(config.translator.default_page_size.get(), 25);
    }

    #[test]
    fn malformed_page_size_variable_is_invalid() {
        for raw in ["abc", "0", "-3", ""] {
            let err = AppConfig::load_with(lookup(&[(PAGE_SIZE_VAR, raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{PAGE_SIZE_VAR}={raw:?}");
        }
    }
}
