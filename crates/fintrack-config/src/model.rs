use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

pub const DEFAULT_HORIZON_DAYS: u32 = 30;
const MAX_HORIZON_DAYS: u32 = 365 * 5;

/// Stores user-configurable forecasting and output preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_horizon_days_value")]
    pub default_horizon_days: u32,
    /// Step recurring incomes and bills through the forecast window.
    #[serde(default)]
    pub expand_recurring: bool,
    #[serde(default)]
    pub currency_precision: Option<u8>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for per-user record snapshots.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_horizon_days: Self::default_horizon_days_value(),
            expand_recurring: false,
            currency_precision: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    fn default_horizon_days_value() -> u32 {
        DEFAULT_HORIZON_DAYS
    }

    fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_horizon_days == 0 || self.default_horizon_days > MAX_HORIZON_DAYS {
            return Err(ConfigError::Invalid(format!(
                "default_horizon_days must be between 1 and {MAX_HORIZON_DAYS}"
            )));
        }
        if self.currency.trim().len() != 3 {
            return Err(ConfigError::Invalid(format!(
                "currency `{}` is not a three-letter code",
                self.currency
            )));
        }
        if matches!(self.currency_precision, Some(precision) if precision > 6) {
            return Err(ConfigError::Invalid(
                "currency_precision cannot exceed 6".into(),
            ));
        }
        Ok(())
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("fintrack").join("records")
    }
}
