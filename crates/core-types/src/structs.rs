use crate::enums::SentimentLabel;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Observation {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// A date-ascending price history for a single asset.
///
/// The constructor is the only place the series shape is checked: dates must be
/// strictly ascending (which also rules out duplicates) and every close must be
/// positive and finite. Everything downstream relies on that and does not check
/// again. Gaps between dates (weekends, holidays) are expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    asset: String,
    observations: Vec<Observation>,
}

impl PriceSeries {
    pub fn new(
        asset: impl Into<String>,
        observations: Vec<Observation>,
    ) -> Result<Self, CoreError> {
        let asset = asset.into();
        if asset.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "asset".to_string(),
                "identifier must not be empty".to_string(),
            ));
        }

        for (i, obs) in observations.iter().enumerate() {
            if !obs.close.is_finite() || obs.close <= 0.0 {
                return Err(CoreError::InvalidClose {
                    asset,
                    date: obs.date,
                    close: obs.close,
                });
            }
            if i > 0 {
                let prev = observations[i - 1].date;
                if obs.date == prev {
                    return Err(CoreError::DuplicateDate {
                        asset,
                        date: obs.date,
                    });
                }
                if obs.date < prev {
                    return Err(CoreError::UnsortedDates {
                        asset,
                        date: obs.date,
                    });
                }
            }
        }

        Ok(Self {
            asset,
            observations,
        })
    }

    /// Builds a series from bare (date, close) pairs.
    pub fn from_closes(
        asset: impl Into<String>,
        points: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self, CoreError> {
        let observations = points
            .into_iter()
            .map(|(date, close)| Observation::new(date, close))
            .collect();
        Self::new(asset, observations)
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn volumes(&self) -> Vec<Option<u64>> {
        self.observations.iter().map(|o| o.volume).collect()
    }

    /// Returns the part of the series dated on or after `start`.
    pub fn since(&self, start: NaiveDate) -> PriceSeries {
        // Ascending order lets us cut at the first qualifying index.
        let cut = self.observations.partition_point(|o| o.date < start);
        PriceSeries {
            asset: self.asset.clone(),
            observations: self.observations[cut..].to_vec(),
        }
    }

    /// Returns the part of the series dated within `start..=end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let from = self.observations.partition_point(|o| o.date < start);
        let to = self.observations.partition_point(|o| o.date <= end).max(from);
        PriceSeries {
            asset: self.asset.clone(),
            observations: self.observations[from..to].to_vec(),
        }
    }
}

/// A single point of a date-aligned derived series (drawdown, z-score,
/// rolling correlation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

impl DatedValue {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A labelled sentiment score. `compound` lies in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub compound: f64,
}

impl Sentiment {
    pub fn from_compound(compound: f64) -> Self {
        Self {
            label: SentimentLabel::from_compound(compound),
            compound,
        }
    }
}
