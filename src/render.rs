//! Terminal rendering of reports as tables.

use analytics::{AssetReport, ComparisonReport, SentimentSummary};
use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::Sentiment;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn pct(value: f64) -> String {
    format!("{value:.1}%")
}

fn period(report: &AssetReport) -> String {
    match (report.first_date, report.last_date) {
        (Some(first), Some(last)) => format!("{first} .. {last}"),
        _ => "-".to_string(),
    }
}

/// The metric cards of both assets, side by side.
pub fn metrics_table(report: &ComparisonReport) -> Table {
    let (a, b) = (&report.primary, &report.secondary);
    let volatility_label = if a.annualized {
        "Volatility (annualized)"
    } else {
        "Volatility (daily)"
    };

    let rows: Vec<(&str, String, String)> = vec![
        ("Period", period(a), period(b)),
        (
            "Observations",
            a.observations.to_string(),
            b.observations.to_string(),
        ),
        (
            "Last close",
            a.last_close.map_or("-".into(), |c| format!("${c:.2}")),
            b.last_close.map_or("-".into(), |c| format!("${c:.2}")),
        ),
        ("Total return", pct(a.total_return_pct), pct(b.total_return_pct)),
        (volatility_label, pct(a.volatility_pct), pct(b.volatility_pct)),
        (
            "Sharpe ratio",
            a.sharpe_ratio.map_or("n/a".into(), |s| format!("{s:.2}")),
            b.sharpe_ratio.map_or("n/a".into(), |s| format!("{s:.2}")),
        ),
        ("Max drawdown", pct(a.max_drawdown_pct), pct(b.max_drawdown_pct)),
    ];

    let mut table = new_table();
    table.set_header(vec!["Metric", a.asset.as_str(), b.asset.as_str()]);
    for (label, left, right) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(left).set_alignment(CellAlignment::Right),
            Cell::new(right).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Overall and rolling correlation, as plain lines.
pub fn correlation_lines(report: &ComparisonReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Common trading days: {}",
        report.common_observations
    )];

    match (report.overall_correlation, report.correlation_strength) {
        (Some(c), Some(strength)) => {
            lines.push(format!("Overall correlation: {c:.3} ({})", strength.description()))
        }
        _ => lines.push("Overall correlation: n/a".to_string()),
    }

    match report.rolling_summary() {
        Some(summary) => lines.push(format!(
            "Rolling correlation ({} days): latest {:.3} on {}, min {:.3}, max {:.3}",
            report.rolling_window,
            summary.latest.value,
            summary.latest.date,
            summary.min,
            summary.max
        )),
        None => lines.push(format!(
            "Rolling correlation ({} days): not enough common data",
            report.rolling_window
        )),
    }
    lines
}

/// A date-indexed table with one column per asset; missing values show as `-`.
pub fn tail_table(
    title: &str,
    assets: (&str, &str),
    rows: &[(NaiveDate, Option<String>, Option<String>)],
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        format!("{title} / Date"),
        assets.0.to_string(),
        assets.1.to_string(),
    ]);
    for (date, left, right) in rows {
        table.add_row(vec![
            Cell::new(date),
            Cell::new(left.as_deref().unwrap_or("-")).set_alignment(CellAlignment::Right),
            Cell::new(right.as_deref().unwrap_or("-")).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn sentiment_table(headlines: &[String], scores: &[Sentiment]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Headline", "Label", "Compound"]);
    for (headline, score) in headlines.iter().zip(scores) {
        table.add_row(vec![
            Cell::new(headline),
            Cell::new(score.label.as_str()),
            Cell::new(format!("{:+.3}", score.compound)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn sentiment_summary_line(summary: &SentimentSummary) -> String {
    format!(
        "{} headlines: {} positive, {} negative, {} neutral; mean compound {:+.3} ({})",
        summary.total,
        summary.positive,
        summary.negative,
        summary.neutral,
        summary.mean_compound,
        summary.overall.as_str()
    )
}
