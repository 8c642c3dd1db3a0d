use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    currency::{CurrencyCode, LocaleConfig},
    errors::{EstateError, Result},
    ledger::{Language, PeriodBoundary, PeriodKind, StatusFilter},
};

/// Upper bound on trend windows, shared by the config file and `--months`.
pub const MAX_SERIES_MONTHS: u32 = 120;

/// User preferences for the CLI and for embedding hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub default_period: PeriodKind,
    pub default_status: StatusFilter,
    pub series_months: u32,
    pub stale_after_secs: u64,
    pub period_boundary: PeriodBoundary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "fr-FR".into(),
            currency: "EUR".into(),
            default_period: PeriodKind::default(),
            default_status: StatusFilter::default(),
            series_months: 12,
            stale_after_secs: 300,
            period_boundary: PeriodBoundary::default(),
            data_file: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SERIES_MONTHS).contains(&self.series_months) {
            return Err(EstateError::Config(format!(
                "seriesMonths must be between 1 and {MAX_SERIES_MONTHS}, got {}",
                self.series_months
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(EstateError::Config("currency must not be empty".into()));
        }
        Ok(())
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.trim())
    }

    pub fn language(&self) -> Language {
        Language::from_locale(&self.locale)
    }

    pub fn stale_after(&self) -> Duration {
        // chrono caps durations at i64::MAX milliseconds
        let secs = self.stale_after_secs.min(i64::MAX as u64 / 1_000) as i64;
        Duration::seconds(secs)
    }
}

pub struct ConfigManager {
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
        })
    }

    /// Missing file means defaults; a present but invalid file is an error.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        tracing::debug!(path = %self.path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
