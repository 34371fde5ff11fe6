use chrono::NaiveDate;
use core_types::{CorrelationStrength, DatedValue};
use serde::{Deserialize, Serialize};

/// The headline figures for one asset over the analysed period.
///
/// Percentages are already multiplied by 100 (`12.4` means 12.4%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReport {
    pub asset: String,
    pub observations: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub last_close: Option<f64>,

    pub total_return_pct: f64,
    pub volatility_pct: f64,
    pub annualized: bool,
    pub sharpe_ratio: Option<f64>, // None when volatility is zero or unknown
    pub max_drawdown_pct: f64,
}

/// Side-by-side view of two assets plus their co-movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub primary: AssetReport,
    pub secondary: AssetReport,

    /// Dates both assets traded on.
    pub common_observations: usize,
    pub overall_correlation: Option<f64>,
    pub correlation_strength: Option<CorrelationStrength>,

    pub rolling_window: usize,
    /// Only the positions where a full, non-degenerate window was available.
    pub rolling_correlation: Vec<DatedValue>,
}

/// Latest, lowest and highest value of the rolling correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingSummary {
    pub latest: DatedValue,
    pub min: f64,
    pub max: f64,
}

impl ComparisonReport {
    pub fn rolling_summary(&self) -> Option<RollingSummary> {
        let latest = *self.rolling_correlation.last()?;
        let (min, max) = self
            .rolling_correlation
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
                (min.min(p.value), max.max(p.value))
            });
        Some(RollingSummary { latest, min, max })
    }
}
