use analytics::metrics::{
    drawdown_series, max_drawdown_pct, mean, normalize, overall_correlation, sample_std_dev,
    simple_returns, total_return_pct,
};
use proptest::prelude::*;

fn prices() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..10_000.0, 1..120)
}

proptest! {
    #[test]
    fn drawdown_starts_at_zero_and_never_goes_positive(p in prices()) {
        let dd = drawdown_series(&p);
        prop_assert_eq!(dd.len(), p.len());
        prop_assert_eq!(dd[0], 0.0);
        prop_assert!(dd.iter().all(|v| *v <= 0.0));
        prop_assert!(max_drawdown_pct(&p) <= 0.0);
    }

    #[test]
    fn rising_series_has_no_drawdown(mut p in prices()) {
        p.sort_by(|a, b| a.partial_cmp(b).unwrap());
        prop_assert_eq!(max_drawdown_pct(&p), 0.0);
    }

    #[test]
    fn short_series_return_is_exactly_zero(p in prop::collection::vec(1.0f64..100.0, 0..2)) {
        prop_assert_eq!(total_return_pct(&p), 0.0);
    }

    #[test]
    fn normalized_series_has_zero_mean_and_unit_sd(p in prop::collection::vec(1.0f64..10_000.0, 3..120)) {
        prop_assume!(sample_std_dev(&p).unwrap() > 1e-6);
        let z = normalize(&p).unwrap();
        prop_assert!(mean(&z).unwrap().abs() < 1e-9);
        prop_assert!((sample_std_dev(&z).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn self_correlation_is_one(p in prop::collection::vec(1.0f64..10_000.0, 3..120)) {
        let r = simple_returns(&p);
        prop_assume!(sample_std_dev(&r).unwrap() > 1e-9);
        let c = overall_correlation(&r, &r).unwrap();
        prop_assert!((c - 1.0).abs() < 1e-12);
    }
}
