use chrono::NaiveDate;
use core_types::PriceSeries;
use std::cmp::Ordering;

/// Two price histories restricted to the dates they have in common.
///
/// Produced by [`inner_join`]. `dates`, `closes_a` and `closes_b` always have
/// the same length and index `i` of each refers to the same calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub dates: Vec<NaiveDate>,
    pub closes_a: Vec<f64>,
    pub closes_b: Vec<f64>,
}

/// One day's simple return for both assets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPair {
    pub date: NaiveDate,
    pub a: f64,
    pub b: f64,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Day-over-day returns on the common calendar, dated by the later day.
    ///
    /// A day missing from either asset is absent here too, so a return may
    /// span a gap that exists in only one of the original series.
    pub fn returns(&self) -> Vec<ReturnPair> {
        (1..self.len())
            .map(|i| ReturnPair {
                date: self.dates[i],
                a: self.closes_a[i] / self.closes_a[i - 1] - 1.0,
                b: self.closes_b[i] / self.closes_b[i - 1] - 1.0,
            })
            .collect()
    }

    /// The return columns split apart, ready for the correlation functions.
    pub fn return_columns(&self) -> (Vec<NaiveDate>, Vec<f64>, Vec<f64>) {
        let pairs = self.returns();
        let dates = pairs.iter().map(|p| p.date).collect();
        let a = pairs.iter().map(|p| p.a).collect();
        let b = pairs.iter().map(|p| p.b).collect();
        (dates, a, b)
    }
}

/// Keeps only the dates present in both series.
///
/// Relies on both inputs being strictly date-ascending (guaranteed by
/// `PriceSeries::new`), which makes this a single merge walk.
pub fn inner_join(a: &PriceSeries, b: &PriceSeries) -> AlignedPair {
    let (obs_a, obs_b) = (a.observations(), b.observations());
    let capacity = obs_a.len().min(obs_b.len());
    let mut pair = AlignedPair {
        dates: Vec::with_capacity(capacity),
        closes_a: Vec::with_capacity(capacity),
        closes_b: Vec::with_capacity(capacity),
    };

    let (mut i, mut j) = (0, 0);
    while i < obs_a.len() && j < obs_b.len() {
        match obs_a[i].date.cmp(&obs_b[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                pair.dates.push(obs_a[i].date);
                pair.closes_a.push(obs_a[i].close);
                pair.closes_b.push(obs_b[j].close);
                i += 1;
                j += 1;
            }
        }
    }

    let dropped = obs_a.len() + obs_b.len() - 2 * pair.len();
    if dropped > 0 {
        tracing::debug!(
            asset_a = a.asset(),
            asset_b = b.asset(),
            common = pair.len(),
            dropped,
            "Dropped one-sided dates while aligning"
        );
    }

    pair
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn keeps_only_common_dates() {
        // Day 4 is a holiday for B, day 6 for A.
        let a = PriceSeries::from_closes(
            "A",
            vec![(day(1), 10.0), (day(4), 11.0), (day(5), 12.0), (day(7), 13.0)],
        )
        .unwrap();
        let b = PriceSeries::from_closes(
            "B",
            vec![(day(1), 20.0), (day(5), 21.0), (day(6), 22.0), (day(7), 23.0)],
        )
        .unwrap();

        let pair = inner_join(&a, &b);
        assert_eq!(pair.dates, vec![day(1), day(5), day(7)]);
        assert_eq!(pair.closes_a, vec![10.0, 12.0, 13.0]);
        assert_eq!(pair.closes_b, vec![20.0, 21.0, 23.0]);
    }

    #[test]
    fn returns_are_computed_on_the_joined_calendar() {
        let a = PriceSeries::from_closes("A", vec![(day(1), 100.0), (day(2), 50.0), (day(3), 110.0)])
            .unwrap();
        let b = PriceSeries::from_closes("B", vec![(day(1), 10.0), (day(3), 12.0)]).unwrap();

        let returns = inner_join(&a, &b).returns();
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].date, day(3));
        assert!((returns[0].a - 0.1).abs() < 1e-12);
        assert!((returns[0].b - 0.2).abs() < 1e-12);
    }

    #[test]
    fn disjoint_series_align_to_nothing() {
        let a = PriceSeries::from_closes("A", vec![(day(1), 1.0), (day(3), 1.0)]).unwrap();
        let b = PriceSeries::from_closes("B", vec![(day(2), 1.0), (day(4), 1.0)]).unwrap();
        let pair = inner_join(&a, &b);
        assert!(pair.is_empty());
        assert!(pair.returns().is_empty());
        let (dates, ra, rb) = pair.return_columns();
        assert!(dates.is_empty() && ra.is_empty() && rb.is_empty());
    }
}
