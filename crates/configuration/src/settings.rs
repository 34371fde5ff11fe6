use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an empty `config.toml` (or no
/// file at all) yields a working setup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dashboard: Dashboard,
    pub analytics: AnalyticsSettings,
    pub data: DataSettings,
    pub logging: LoggingSettings,
}

/// What is being compared and what gets shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    /// The first asset of the comparison (e.g., "BTC-USD").
    pub primary_asset: String,
    /// The second asset of the comparison (e.g., "^GSPC").
    pub secondary_asset: String,
    /// How many years of history, counted back from the latest common date.
    pub years: u32,
    pub show_normalized: bool,
    pub show_drawdown: bool,
    pub show_volume: bool,
}

/// Parameters handed to the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Annual risk-free rate used by the Sharpe ratio. 0.04 corresponds to 4%.
    pub risk_free_rate: f64,
    /// Number of trailing return observations in each rolling correlation window.
    pub rolling_window: usize,
    /// Whether volatility is scaled to a yearly figure.
    pub annualize: bool,
}

/// Where price files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding one `<ASSET>.csv` per asset.
    pub directory: PathBuf,
    /// Directory the `export` command writes to.
    pub export_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            primary_asset: "BTC-USD".to_string(),
            secondary_asset: "^GSPC".to_string(),
            years: 5,
            show_normalized: true,
            show_drawdown: true,
            show_volume: false,
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.04,
            rolling_window: 30,
            annualize: true,
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            export_directory: PathBuf::from("exports"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "tandem.log".to_string(),
        }
    }
}

pub const MIN_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 10;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.dashboard;
        if d.primary_asset.trim().is_empty() || d.secondary_asset.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "dashboard assets must not be empty".to_string(),
            ));
        }
        if !(MIN_YEARS..=MAX_YEARS).contains(&d.years) {
            return Err(ConfigError::ValidationError(format!(
                "dashboard.years must be between {} and {}, got {}",
                MIN_YEARS, MAX_YEARS, d.years
            )));
        }

        let a = &self.analytics;
        if a.rolling_window < 2 {
            return Err(ConfigError::ValidationError(format!(
                "analytics.rolling_window must be at least 2, got {}",
                a.rolling_window
            )));
        }
        if !a.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(
                "analytics.risk_free_rate must be a finite number".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level '{}' is not one of {:?}",
                self.logging.level, LOG_LEVELS
            )));
        }

        Ok(())
    }
}
