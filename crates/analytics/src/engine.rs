use crate::align::inner_join;
use crate::error::AnalyticsError;
use crate::metrics;
use crate::report::{AssetReport, ComparisonReport};
use configuration::AnalyticsSettings;
use core_types::{CorrelationStrength, DatedValue, PriceSeries};

/// A stateless calculator for deriving comparison metrics from price series.
///
/// The engine only carries its immutable parameters; every method is a pure
/// function of its arguments, so one engine can be shared freely.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    settings: AnalyticsSettings,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            settings: AnalyticsSettings::default(),
        }
    }
}

impl AnalyticsEngine {
    pub fn new(settings: AnalyticsSettings) -> Result<Self, AnalyticsError> {
        if settings.rolling_window < 2 {
            return Err(AnalyticsError::InvalidWindow(settings.rolling_window));
        }
        if !settings.risk_free_rate.is_finite() {
            return Err(AnalyticsError::InvalidParameter(
                "risk_free_rate".to_string(),
                format!("{} is not finite", settings.risk_free_rate),
            ));
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Computes the metric cards for a single asset.
    pub fn asset_report(&self, series: &PriceSeries) -> AssetReport {
        let closes = series.closes();

        let report = AssetReport {
            asset: series.asset().to_string(),
            observations: series.len(),
            first_date: series.first().map(|o| o.date),
            last_date: series.last().map(|o| o.date),
            last_close: series.last().map(|o| o.close),
            total_return_pct: metrics::total_return_pct(&closes),
            volatility_pct: metrics::volatility_pct(&closes, self.settings.annualize),
            annualized: self.settings.annualize,
            sharpe_ratio: metrics::try_sharpe_ratio(&closes, self.settings.risk_free_rate),
            max_drawdown_pct: metrics::max_drawdown_pct(&closes),
        };

        if report.sharpe_ratio.is_none() {
            tracing::debug!(
                asset = series.asset(),
                observations = series.len(),
                "Sharpe ratio undefined (zero or unknown volatility)"
            );
        }
        tracing::debug!(?report, "Asset report computed");
        report
    }

    /// Compares two assets on the dates they share.
    ///
    /// The per-asset cards use each full series, while everything involving
    /// both assets runs on the date intersection only.
    pub fn compare(&self, primary: &PriceSeries, secondary: &PriceSeries) -> ComparisonReport {
        let aligned = inner_join(primary, secondary);
        let (dates, returns_a, returns_b) = aligned.return_columns();

        let overall = metrics::overall_correlation(&returns_a, &returns_b);
        let rolling = dated(
            &dates,
            metrics::rolling_correlation(&returns_a, &returns_b, self.settings.rolling_window),
        );

        if aligned.is_empty() {
            tracing::warn!(
                primary = primary.asset(),
                secondary = secondary.asset(),
                "Assets have no trading dates in common"
            );
        }

        ComparisonReport {
            primary: self.asset_report(primary),
            secondary: self.asset_report(secondary),
            common_observations: aligned.len(),
            overall_correlation: overall,
            correlation_strength: overall.map(CorrelationStrength::from_coefficient),
            rolling_window: self.settings.rolling_window,
            rolling_correlation: rolling,
        }
    }

    /// Drawdown from the running high, one point per observation.
    pub fn drawdowns(&self, series: &PriceSeries) -> Vec<DatedValue> {
        series
            .dates()
            .into_iter()
            .zip(metrics::drawdown_series(&series.closes()))
            .map(|(date, value)| DatedValue::new(date, value))
            .collect()
    }

    /// z-scored closes, or `None` for a series without variance.
    pub fn normalized(&self, series: &PriceSeries) -> Option<Vec<DatedValue>> {
        let z = metrics::normalize(&series.closes())?;
        Some(
            series
                .dates()
                .into_iter()
                .zip(z)
                .map(|(date, value)| DatedValue::new(date, value))
                .collect(),
        )
    }

    /// Rolling correlation of the two assets' returns on their common dates.
    pub fn rolling_correlation(
        &self,
        primary: &PriceSeries,
        secondary: &PriceSeries,
    ) -> Vec<DatedValue> {
        let (dates, returns_a, returns_b) = inner_join(primary, secondary).return_columns();
        dated(
            &dates,
            metrics::rolling_correlation(&returns_a, &returns_b, self.settings.rolling_window),
        )
    }
}

/// Pairs each defined value with its date and drops the undefined ones.
fn dated(dates: &[chrono::NaiveDate], values: Vec<Option<f64>>) -> Vec<DatedValue> {
    dates
        .iter()
        .zip(values)
        .filter_map(|(&date, value)| value.map(|v| DatedValue::new(date, v)))
        .collect()
}
