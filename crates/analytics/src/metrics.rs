//! Pure metric functions over closing prices and return series.
//!
//! Every function here takes plain slices in chronological order. Inputs are
//! assumed to come from a validated `PriceSeries` (ascending dates, positive
//! finite closes), and nothing is re-checked. Degenerate inputs (too few
//! points, zero variance) produce a sentinel: `0.0`, `None`, or a shorter
//! output. They never panic.
//!
//! Standard deviations are sample standard deviations (n - 1 denominator)
//! throughout.

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annual risk-free rate assumed by the Sharpe ratio when none is configured.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.04;

/// Trailing window, in observations, of the dashboard's rolling correlation.
pub const DEFAULT_ROLLING_WINDOW: usize = 30;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation. `None` for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Simple day-over-day returns, one element shorter than `prices`.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// z-score of every value against the whole series.
///
/// `None` when the series has fewer than two points or no variance.
pub fn normalize(values: &[f64]) -> Option<Vec<f64>> {
    let avg = mean(values)?;
    let std_dev = sample_std_dev(values)?;
    if std_dev == 0.0 {
        return None;
    }
    Some(values.iter().map(|v| (v - avg) / std_dev).collect())
}

/// Total return over the series in percent. `0.0` for fewer than two prices.
pub fn total_return_pct(prices: &[f64]) -> f64 {
    match (prices.first(), prices.last()) {
        (Some(first), Some(last)) if prices.len() >= 2 => (last / first - 1.0) * 100.0,
        _ => 0.0,
    }
}

/// Standard deviation of simple returns in percent, optionally annualized
/// with `sqrt(252)`.
///
/// `0.0` when fewer than two returns are available.
pub fn volatility_pct(prices: &[f64], annualize: bool) -> f64 {
    let Some(mut vol) = sample_std_dev(&simple_returns(prices)) else {
        return 0.0;
    };
    if annualize {
        vol *= TRADING_DAYS_PER_YEAR.sqrt();
    }
    vol * 100.0
}

/// Percentage distance of each price below the highest price seen so far.
///
/// Same length as `prices`; every element is `<= 0` and the first is `0`.
pub fn drawdown_series(prices: &[f64]) -> Vec<f64> {
    let Some(&seed) = prices.first() else {
        return Vec::new();
    };

    let mut peak = seed;
    prices
        .iter()
        .map(|&price| {
            if price > peak {
                peak = price;
            }
            (price - peak) / peak * 100.0
        })
        .collect()
}

/// Deepest drawdown in percent (the most negative value), `0.0` if the
/// series never falls below a previous high.
pub fn max_drawdown_pct(prices: &[f64]) -> f64 {
    drawdown_series(prices).into_iter().fold(0.0, f64::min)
}

/// Annualized Sharpe ratio of the daily simple returns.
///
/// `(mean * 252 - risk_free_rate) / (std_dev * sqrt(252))`. Returns `0.0`
/// when the annualized volatility is zero or cannot be computed (fewer than
/// two returns). Use [`try_sharpe_ratio`] to tell those cases apart from a
/// genuine zero.
pub fn sharpe_ratio(prices: &[f64], risk_free_rate: f64) -> f64 {
    try_sharpe_ratio(prices, risk_free_rate).unwrap_or(0.0)
}

/// Like [`sharpe_ratio`], but `None` wherever the ratio is undefined.
pub fn try_sharpe_ratio(prices: &[f64], risk_free_rate: f64) -> Option<f64> {
    let returns = simple_returns(prices);
    let avg = mean(&returns)?;
    let volatility = sample_std_dev(&returns)? * TRADING_DAYS_PER_YEAR.sqrt();
    if volatility == 0.0 {
        return None;
    }
    let excess_return = avg * TRADING_DAYS_PER_YEAR - risk_free_rate;
    Some(excess_return / volatility)
}

/// Pearson correlation coefficient of two equally long slices.
///
/// `None` for mismatched lengths, fewer than two points, or when either side
/// has no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Correlation over the full overlap of two date-aligned return series.
///
/// The inputs are expected to be aligned already (see `align::inner_join`);
/// if one is longer, only the common prefix is used.
pub fn overall_correlation(returns_a: &[f64], returns_b: &[f64]) -> Option<f64> {
    let n = returns_a.len().min(returns_b.len());
    pearson(&returns_a[..n], &returns_b[..n])
}

/// Trailing-window correlation of two date-aligned return series.
///
/// The output has one slot per position of the longer input. Slot `i` holds
/// the correlation of the `window` observations ending at `i`, and is `None`
/// while the window is not yet full, past the end of the shorter input, or
/// when the window has no variance on either side. A `window` below 2 yields
/// only `None`.
pub fn rolling_correlation(
    returns_a: &[f64],
    returns_b: &[f64],
    window: usize,
) -> Vec<Option<f64>> {
    let len = returns_a.len().max(returns_b.len());
    let overlap = returns_a.len().min(returns_b.len());

    (0..len)
        .map(|i| {
            if window < 2 || i + 1 < window || i >= overlap {
                return None;
            }
            let start = i + 1 - window;
            pearson(&returns_a[start..=i], &returns_b[start..=i])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn sample_std_dev_uses_n_minus_one() {
        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // Population sd of this set is 2.0; the sample one is sqrt(32/7).
        assert!(close(sd, (32.0f64 / 7.0).sqrt()));
        assert_eq!(sample_std_dev(&[1.0]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn returns_drop_the_first_element() {
        let r = simple_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert!(close(r[0], 0.1));
        assert!(close(r[1], -0.1));
        assert!(simple_returns(&[100.0]).is_empty());
    }

    #[test]
    fn total_return_of_sample_path() {
        assert!(close(total_return_pct(&[100.0, 110.0, 99.0, 105.0]), 5.0));
        assert_eq!(total_return_pct(&[100.0]), 0.0);
        assert_eq!(total_return_pct(&[]), 0.0);
    }

    #[test]
    fn drawdown_of_sample_path() {
        let dd = drawdown_series(&[100.0, 110.0, 99.0, 105.0]);
        assert_eq!(dd.len(), 4);
        assert_eq!(dd[0], 0.0);
        assert_eq!(dd[1], 0.0);
        assert!(close(dd[2], -10.0));
        assert!(close(dd[3], (105.0 - 110.0) / 110.0 * 100.0));
        assert!(close(max_drawdown_pct(&[100.0, 110.0, 99.0, 105.0]), -10.0));
    }

    #[test]
    fn drawdown_is_zero_for_rising_prices() {
        assert_eq!(max_drawdown_pct(&[1.0, 1.0, 2.0, 3.0, 3.0]), 0.0);
        assert!(drawdown_series(&[]).is_empty());
        assert_eq!(max_drawdown_pct(&[]), 0.0);
    }

    #[test]
    fn volatility_annualizes_with_sqrt_252() {
        let prices = [100.0, 102.0, 101.0, 103.0, 104.0];
        let daily = volatility_pct(&prices, false);
        let yearly = volatility_pct(&prices, true);
        assert!(daily > 0.0);
        assert!(close(yearly, daily * 252f64.sqrt()));

        let expected = sample_std_dev(&simple_returns(&prices)).unwrap() * 100.0;
        assert!(close(daily, expected));
    }

    #[test]
    fn volatility_needs_two_returns() {
        assert_eq!(volatility_pct(&[100.0], true), 0.0);
        assert_eq!(volatility_pct(&[100.0, 101.0], true), 0.0);
    }

    #[test]
    fn sharpe_matches_formula() {
        let prices = [100.0, 101.0, 100.5, 102.0, 103.5, 103.0];
        let returns = simple_returns(&prices);
        let m = mean(&returns).unwrap();
        let sd = sample_std_dev(&returns).unwrap();
        let expected = (m * 252.0 - 0.04) / (sd * 252f64.sqrt());
        assert!(close(sharpe_ratio(&prices, 0.04), expected));
        assert_eq!(try_sharpe_ratio(&prices, 0.04), Some(sharpe_ratio(&prices, 0.04)));
    }

    #[test]
    fn sharpe_guard_returns_zero_for_flat_returns() {
        // Doubling every day: every return is exactly 1.0.
        let prices = [100.0, 200.0, 400.0, 800.0];
        assert_eq!(sharpe_ratio(&prices, 0.04), 0.0);
        assert_eq!(try_sharpe_ratio(&prices, 0.04), None);
        assert_eq!(sharpe_ratio(&[100.0], 0.04), 0.0);
        assert_eq!(try_sharpe_ratio(&[100.0], 0.04), None);
    }

    #[test]
    fn normalize_rejects_constant_series() {
        assert_eq!(normalize(&[3.0, 3.0, 3.0]), None);
        assert_eq!(normalize(&[3.0]), None);
        let z = normalize(&[1.0, 2.0, 3.0]).unwrap();
        assert!(close(z[0], -1.0));
        assert!(close(z[1], 0.0));
        assert!(close(z[2], 1.0));
    }

    #[test]
    fn pearson_detects_perfect_anticorrelation() {
        let x = [0.01, -0.02, 0.03, 0.00];
        let y: Vec<f64> = x.iter().map(|v| -v).collect();
        assert!(close(pearson(&x, &y).unwrap(), -1.0));
        assert_eq!(pearson(&x, &[1.0, 1.0, 1.0, 1.0]), None);
        assert_eq!(pearson(&x, &y[..3]), None);
    }

    #[test]
    fn rolling_correlation_leaves_warmup_empty() {
        let a = [0.01, 0.02, -0.01, 0.03, -0.02];
        let b = [0.02, 0.01, -0.02, 0.02, -0.01];
        let rolled = rolling_correlation(&a, &b, 3);

        assert_eq!(rolled.len(), 5);
        assert!(rolled[0].is_none());
        assert!(rolled[1].is_none());
        for i in 2..5 {
            let expected = pearson(&a[i - 2..=i], &b[i - 2..=i]);
            assert_eq!(rolled[i], expected);
            assert!(rolled[i].is_some());
        }
    }

    #[test]
    fn rolling_correlation_spans_the_longer_input() {
        let a = [0.01, 0.02, -0.01, 0.03];
        let b = [0.02, 0.01, -0.02];
        let rolled = rolling_correlation(&a, &b, 2);
        assert_eq!(rolled.len(), 4);
        assert!(rolled[1].is_some());
        assert!(rolled[2].is_some());
        assert!(rolled[3].is_none());
    }

    #[test]
    fn rolling_correlation_with_tiny_window_is_empty() {
        let a = [0.01, 0.02, -0.01];
        assert!(rolling_correlation(&a, &a, 1).iter().all(Option::is_none));
        assert!(rolling_correlation(&a, &a, 0).iter().all(Option::is_none));
        assert!(rolling_correlation(&a, &a, 10).iter().all(Option::is_none));
    }
}
