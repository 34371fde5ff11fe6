use analytics::metrics::{
    drawdown_series, max_drawdown_pct, overall_correlation, rolling_correlation, sharpe_ratio,
    simple_returns, total_return_pct, volatility_pct,
};
use analytics::{AnalyticsEngine, inner_join};
use chrono::{Duration, NaiveDate};
use configuration::AnalyticsSettings;
use core_types::PriceSeries;

fn dated(asset: &str, start: NaiveDate, closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes(
        asset,
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| (start + Duration::days(i as i64), c)),
    )
    .unwrap()
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 6, 1).unwrap()
}

#[test]
fn four_day_path_figures() {
    let prices = [100.0, 110.0, 99.0, 105.0];

    assert!((total_return_pct(&prices) - 5.0).abs() < 1e-9);

    let dd = drawdown_series(&prices);
    let expected = [0.0, 0.0, -10.0, -4.545_454_545_454_546];
    for (got, want) in dd.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
    }
    assert!((max_drawdown_pct(&prices) + 10.0).abs() < 1e-9);
}

#[test]
fn identical_returns_are_perfectly_correlated() {
    let a = [100.0, 103.0, 101.0, 104.0, 108.0, 105.0, 107.0, 111.0, 109.0, 112.0];
    // Doubling every price leaves every daily return unchanged.
    let b: Vec<f64> = a.iter().map(|p| p * 2.0).collect();

    let series_a = dated("A", start(), &a);
    let series_b = dated("B", start(), &b);
    let (_, ra, rb) = inner_join(&series_a, &series_b).return_columns();
    assert_eq!(ra, rb);

    let overall = overall_correlation(&ra, &rb).unwrap();
    assert!((overall - 1.0).abs() < 1e-12);

    let window = 4;
    let rolled = rolling_correlation(&ra, &rb, window);
    assert_eq!(rolled.len(), ra.len());
    assert!(rolled[..window - 1].iter().all(Option::is_none));
    for value in &rolled[window - 1..] {
        assert!((value.unwrap() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn single_observation_yields_sentinels() {
    let prices = [250.0];
    assert_eq!(total_return_pct(&prices), 0.0);
    assert_eq!(volatility_pct(&prices, true), 0.0);
    assert_eq!(sharpe_ratio(&prices, 0.04), 0.0);
    assert_eq!(drawdown_series(&prices), vec![0.0]);
}

#[test]
fn volatility_ignores_price_scale() {
    let prices = [100.0, 102.5, 99.0, 101.0, 104.0, 103.0];
    let doubled: Vec<f64> = prices.iter().map(|p| p * 2.0).collect();
    assert_eq!(volatility_pct(&prices, true), volatility_pct(&doubled, true));
    assert_eq!(volatility_pct(&prices, false), volatility_pct(&doubled, false));
}

#[test]
fn holidays_are_dropped_from_both_sides() {
    // A trades every day, B skips the third and sixth day.
    let a = dated("A", start(), &[10.0, 11.0, 12.0, 11.5, 12.5, 13.0, 12.0]);
    let b_obs: Vec<_> = dated("B", start(), &[20.0, 21.0, 99.0, 22.0, 23.0, 99.0, 22.5])
        .observations()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 5)
        .map(|(_, o)| *o)
        .collect();
    let b = PriceSeries::new("B", b_obs).unwrap();

    let pair = inner_join(&a, &b);
    assert_eq!(pair.len(), 5);
    assert!(!pair.closes_b.contains(&99.0));
    assert_eq!(pair.closes_a, vec![10.0, 11.0, 11.5, 12.5, 12.0]);

    let returns = pair.returns();
    assert_eq!(returns.len(), 4);
    // The return across the gap uses the last common close on both sides.
    assert!((returns[1].a - (11.5 / 11.0 - 1.0)).abs() < 1e-15);
    assert!((returns[1].b - (22.0 / 21.0 - 1.0)).abs() < 1e-15);
}

#[test]
fn engine_is_deterministic() {
    let engine = AnalyticsEngine::new(AnalyticsSettings {
        rolling_window: 3,
        ..AnalyticsSettings::default()
    })
    .unwrap();
    let a = dated("A", start(), &[100.0, 101.0, 99.5, 102.0, 101.0, 103.5, 104.0]);
    let b = dated("B", start(), &[50.0, 50.5, 50.2, 49.0, 49.5, 51.0, 50.0]);

    let first = engine.compare(&a, &b);
    let second = engine.compare(&a, &b);
    assert_eq!(first, second);

    let returns = simple_returns(&a.closes());
    assert_eq!(returns.len(), 6);
}
