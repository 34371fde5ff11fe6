use crate::error::DataError;
use analytics::inner_join;
use analytics::metrics::{drawdown_series, normalize};
use chrono::NaiveDate;
use core_types::PriceSeries;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SeriesRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: Option<u64>,
    #[serde(rename = "Drawdown")]
    drawdown: f64,
}

#[derive(Debug, Serialize)]
struct MergedRow {
    date: NaiveDate,
    close_a: f64,
    close_b: f64,
    z_a: Option<f64>,
    z_b: Option<f64>,
}

/// `{asset}_{years}y.csv`, e.g. `BTC-USD_5y.csv`.
pub fn export_file_name(asset: &str, years: u32) -> String {
    format!("{asset}_{years}y.csv")
}

pub fn merged_file_name(primary: &str, secondary: &str, years: u32) -> String {
    format!("{primary}_{secondary}_{years}y_merged.csv")
}

/// Writes one row per observation: Date, Close, Volume, Drawdown (%).
pub fn write_series_csv<W: Write>(series: &PriceSeries, writer: W) -> Result<(), DataError> {
    let drawdowns = drawdown_series(&series.closes());
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (obs, drawdown) in series.observations().iter().zip(drawdowns) {
        csv_writer.serialize(SeriesRow {
            date: obs.date,
            close: obs.close,
            volume: obs.volume,
            drawdown,
        })?;
    }

    // An empty series still gets its header row.
    if series.is_empty() {
        csv_writer.write_record(["Date", "Close", "Volume", "Drawdown"])?;
    }

    csv_writer.flush().map_err(|source| DataError::Io {
        path: "<series export>".into(),
        source,
    })?;
    Ok(())
}

/// Writes the date intersection of two series side by side.
///
/// Columns: `Date`, the two closes, then each asset's z-score. The z-scores are
/// taken over each asset's own series before the join, so they match
/// `AnalyticsEngine::normalized`; a column stays empty when that asset has no
/// variance.
pub fn write_merged_csv<W: Write>(
    primary: &PriceSeries,
    secondary: &PriceSeries,
    writer: W,
) -> Result<(), DataError> {
    let aligned = inner_join(primary, secondary);
    let z_a = z_scores_by_date(primary);
    let z_b = z_scores_by_date(secondary);

    // Column names depend on the assets, so the header is written by hand and
    // the rows are serialized without one.
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record([
        "Date".to_string(),
        primary.asset().to_string(),
        secondary.asset().to_string(),
        format!("{} z-score", primary.asset()),
        format!("{} z-score", secondary.asset()),
    ])?;

    for (i, date) in aligned.dates.iter().enumerate() {
        csv_writer.serialize(MergedRow {
            date: *date,
            close_a: aligned.closes_a[i],
            close_b: aligned.closes_b[i],
            z_a: z_a.get(date).copied(),
            z_b: z_b.get(date).copied(),
        })?;
    }

    csv_writer.flush().map_err(|source| DataError::Io {
        path: "<merged export>".into(),
        source,
    })?;

    tracing::debug!(
        primary = primary.asset(),
        secondary = secondary.asset(),
        rows = aligned.len(),
        "Merged table written"
    );
    Ok(())
}

fn z_scores_by_date(series: &PriceSeries) -> HashMap<NaiveDate, f64> {
    normalize(&series.closes())
        .map(|z| series.dates().into_iter().zip(z).collect())
        .unwrap_or_default()
}

/// Creates (or truncates) `path`, creating parent directories as needed.
pub fn create_file(path: &Path) -> Result<File, DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DataError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    File::create(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}
