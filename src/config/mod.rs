use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    currency::CurrencyFormat,
    errors::{LedgerError, Result},
    storage::DEFAULT_STORAGE_KEY,
};

/// Longest daily trend the dashboard will draw.
pub const MAX_TREND_DAYS: usize = 366;

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: [&str; 9] = [
    "storage_key",
    "currency",
    "currency_symbol",
    "grouping_separator",
    "monthly_window",
    "trend_days",
    "top_voted_limit",
    "recent_limit",
    "confirm_destructive",
];

/// User preferences. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_key: String,
    pub currency: String,
    pub currency_symbol: String,
    pub grouping_separator: char,
    pub monthly_window: usize,
    pub trend_days: usize,
    pub top_voted_limit: usize,
    pub recent_limit: usize,
    pub confirm_destructive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            currency: "VND".into(),
            currency_symbol: "₫".into(),
            grouping_separator: '.',
            monthly_window: 6,
            trend_days: 7,
            top_voted_limit: 5,
            recent_limit: 5,
            confirm_destructive: true,
        }
    }
}

impl Config {
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat {
            code: self.currency.clone(),
            symbol: self.currency_symbol.clone(),
            grouping_separator: self.grouping_separator,
        }
    }

    /// Updates one field from its textual form. Nothing changes when the
    /// value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        next.apply(key, value.trim())?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage_key" => self.storage_key = value.to_string(),
            "currency" => self.currency = value.to_uppercase(),
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "grouping_separator" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(separator), None) => self.grouping_separator = separator,
                    _ => {
                        return Err(LedgerError::Config(
                            "grouping_separator must be a single character".into(),
                        ))
                    }
                }
            }
            "monthly_window" => self.monthly_window = parse_count(key, value)?,
            "trend_days" => self.trend_days = parse_count(key, value)?,
            "top_voted_limit" => self.top_voted_limit = parse_count(key, value)?,
            "recent_limit" => self.recent_limit = parse_count(key, value)?,
            "confirm_destructive" => {
                self.confirm_destructive = value.parse().map_err(|_| {
                    LedgerError::Config("confirm_destructive must be true or false".into())
                })?
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("storage_key", self.storage_key.clone()),
            ("currency", self.currency.clone()),
            ("currency_symbol", self.currency_symbol.clone()),
            ("grouping_separator", self.grouping_separator.to_string()),
            ("monthly_window", self.monthly_window.to_string()),
            ("trend_days", self.trend_days.to_string()),
            ("top_voted_limit", self.top_voted_limit.to_string()),
            ("recent_limit", self.recent_limit.to_string()),
            ("confirm_destructive", self.confirm_destructive.to_string()),
        ]
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(LedgerError::Config("storage_key must not be empty".into()));
        }
        if self.trend_days == 0 || self.monthly_window == 0 {
            return Err(LedgerError::Config(
                "trend_days and monthly_window must be at least 1".into(),
            ));
        }
        if self.trend_days > MAX_TREND_DAYS {
            return Err(LedgerError::Config(format!(
                "trend_days must not exceed {}",
                MAX_TREND_DAYS
            )));
        }
        Ok(())
    }
}

/// Loads and saves `config.json` in the application data directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| LedgerError::Config(format!("{}: {}", self.path.display(), err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the ledger files.
    pub fn ledger_dir(&self) -> PathBuf {
        PathResolver::ledger_dir_in(&self.base)
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| LedgerError::Config(format!("{} must be a whole number, got `{}`", key, value)))
}
