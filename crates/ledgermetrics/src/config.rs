//! Export configuration.
//!
//! The journal comes from the command line; everything else comes from the
//! environment:
//!
//! - `LEDGERMETRICS_HLEDGER` - the hledger executable (default `hledger`)
//! - `LEDGERMETRICS_TARGET_CURRENCIES` - comma-separated target currencies
//!   (default `SEK,USD,EUR,RUB`)

use crate::source::Hledger;
use ledgermetrics_fx::{FxResolver, DEFAULT_TARGET_CURRENCIES};
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the hledger executable.
pub const HLEDGER_ENV: &str = "LEDGERMETRICS_HLEDGER";

/// Environment variable listing the target currencies.
pub const TARGET_CURRENCIES_ENV: &str = "LEDGERMETRICS_TARGET_CURRENCIES";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The target currency list names no currency.
    #[error("{TARGET_CURRENCIES_ENV} must name at least one currency, got {raw:?}")]
    NoTargetCurrencies {
        /// The configured value.
        raw: String,
    },

    /// An environment variable is not valid UTF-8.
    #[error("{name} is not valid UTF-8")]
    NotUnicode {
        /// The variable.
        name: &'static str,
    },
}

/// Everything needed for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// The hledger executable.
    pub hledger: OsString,
    /// Journal passed to hledger as `--file`; hledger's own lookup otherwise.
    pub file: Option<PathBuf>,
    /// Currencies every quoted currency is converted into.
    pub target_currencies: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            hledger: OsString::from("hledger"),
            file: None,
            target_currencies: DEFAULT_TARGET_CURRENCIES.map(String::from).to_vec(),
        }
    }
}

impl ExportConfig {
    /// Build the configuration from the process environment.
    pub fn from_env(file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let targets = match std::env::var(TARGET_CURRENCIES_ENV) {
            Ok(raw) => Some(raw),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NotUnicode {
                    name: TARGET_CURRENCIES_ENV,
                })
            }
        };
        Self::from_vars(file, std::env::var_os(HLEDGER_ENV), targets.as_deref())
    }

    /// Build the configuration from already-read variables.
    pub fn from_vars(
        file: Option<PathBuf>,
        hledger: Option<OsString>,
        target_currencies: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self {
            file,
            ..Self::default()
        };
        if let Some(hledger) = hledger.filter(|h| !h.is_empty()) {
            config.hledger = hledger;
        }
        if let Some(raw) = target_currencies {
            config.target_currencies = parse_target_currencies(raw)?;
        }
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// The hledger source this configuration describes.
    pub fn source(&self) -> Hledger {
        let hledger = Hledger::new(self.hledger.clone());
        match &self.file {
            Some(file) => hledger.with_file(file.clone()),
            None => hledger,
        }
    }

    /// The exchange-rate resolver for the configured targets.
    pub fn resolver(&self) -> FxResolver {
        FxResolver::new(self.target_currencies.iter().cloned())
    }
}

/// Parse a comma-separated currency list, ignoring blank entries.
pub fn parse_target_currencies(raw: &str) -> Result<Vec<String>, ConfigError> {
    let currencies: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect();

    if currencies.is_empty() {
        return Err(ConfigError::NoTargetCurrencies {
            raw: raw.to_string(),
        });
    }
    Ok(currencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::from_vars(None, None, None).unwrap();
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.hledger, "hledger");
        assert_eq!(config.target_currencies, ["SEK", "USD", "EUR", "RUB"]);
        assert_eq!(config.resolver(), FxResolver::default());
    }

    #[test]
    fn test_overrides() {
        let config = ExportConfig::from_vars(
            Some(PathBuf::from("main.journal")),
            Some(OsString::from("/opt/hledger/bin/hledger")),
            Some("EUR, USD"),
        )
        .unwrap();

        assert_eq!(config.hledger, "/opt/hledger/bin/hledger");
        assert_eq!(config.target_currencies, ["EUR", "USD"]);
        assert_eq!(
            config.source(),
            Hledger::new("/opt/hledger/bin/hledger").with_file("main.journal")
        );
    }

    #[test]
    fn test_empty_hledger_keeps_default() {
        let config = ExportConfig::from_vars(None, Some(OsString::new()), None).unwrap();
        assert_eq!(config.hledger, "hledger");
    }

    #[test]
    fn test_blank_currencies_are_skipped() {
        assert_eq!(
            parse_target_currencies("SEK,,  ,EUR,").unwrap(),
            ["SEK", "EUR"]
        );
    }

    #[test]
    fn test_no_currencies() {
        assert_eq!(
            parse_target_currencies(" , "),
            Err(ConfigError::NoTargetCurrencies {
                raw: " , ".to_string()
            })
        );
        assert!(ExportConfig::from_vars(None, None, Some("")).is_err());
    }
}
