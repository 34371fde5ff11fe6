use crate::error::DataError;
use chrono::NaiveDate;
use core_types::{Observation, PriceSeries};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Anything that can hand over the price history of an asset.
///
/// The returned series has already passed `PriceSeries::new`, so consumers can
/// rely on ascending, unique dates and positive closes.
pub trait PriceSource {
    fn load(&self, asset: &str) -> Result<PriceSeries, DataError>;
}

/// Reads `<directory>/<asset>.csv`.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    directory: PathBuf,
}

impl CsvPriceSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, asset: &str) -> PathBuf {
        self.directory.join(format!("{asset}.csv"))
    }
}

impl PriceSource for CsvPriceSource {
    fn load(&self, asset: &str) -> Result<PriceSeries, DataError> {
        let path = self.path_for(asset);
        let file = File::open(&path).map_err(|source| DataError::Io {
            path: path.clone(),
            source,
        })?;

        let series = read_series(asset, file)?;
        tracing::info!(
            asset,
            path = %path.display(),
            observations = series.len(),
            "Loaded price series"
        );
        Ok(series)
    }
}

/// Parses a price table with at least `Date` and `Close` columns.
///
/// Header matching ignores case and surrounding whitespace; `Volume` is picked
/// up when present and every other column is ignored. Rows may arrive in any
/// order and are sorted by date before the series is validated. A time or
/// offset after the date (`2024-01-02 00:00:00-05:00`, `2024-01-02T00:00:00Z`)
/// is discarded.
pub fn read_series<R: Read>(asset: &str, reader: R) -> Result<PriceSeries, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };
    let date_idx = column("date").ok_or_else(|| DataError::MissingColumn("Date".into()))?;
    let close_idx = column("close").ok_or_else(|| DataError::MissingColumn("Close".into()))?;
    let volume_idx = column("volume");

    let mut observations = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date = parse_date(field(date_idx)).ok_or_else(|| DataError::Parse {
            line,
            message: format!("unrecognised date '{}'", field(date_idx)),
        })?;
        let close = field(close_idx)
            .parse::<f64>()
            .map_err(|e| DataError::Parse {
                line,
                message: format!("close '{}': {}", field(close_idx), e),
            })?;
        let volume = match volume_idx {
            Some(idx) => parse_volume(field(idx)).map_err(|message| DataError::Parse {
                line,
                message,
            })?,
            None => None,
        };

        observations.push(Observation {
            date,
            close,
            volume,
        });
    }

    observations.sort_by_key(|o| o.date);
    Ok(PriceSeries::new(asset, observations)?)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Empty means unknown. Float-formatted counts ("1200.0") are accepted.
fn parse_volume(raw: &str) -> Result<Option<u64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(Some(v));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v.round() as u64)),
        _ => Err(format!("volume '{raw}' is not a non-negative number")),
    }
}
