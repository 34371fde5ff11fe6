use analytics::{AnalyticsEngine, SentimentAnalyzer, inner_join};
use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};
use configuration::ConfigOverrides;
use configuration::settings::Config;
use core_types::{DatedValue, PriceSeries};
use market_data::export::create_file;
use market_data::{
    CsvPriceSource, PriceSource, export_file_name, merged_file_name, write_merged_csv,
    write_series_csv,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};

mod render;

/// The main entry point for the Tandem comparison tool.
fn main() -> Result<()> {
    // TANDEM__* overrides may live in a .env file.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(overrides) = cli.command.overrides() {
        overrides.apply(&mut config);
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate().context("Invalid settings after applying flags")?;

    // Held until exit so the file writer can flush.
    let _log_guard = configuration::init_tracing(&config.logging)?;
    tracing::debug!(?config, "Configuration loaded");

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(&config, &args),
        Commands::Export(args) => handle_export(&config, &args),
        Commands::Sentiment(args) => handle_sentiment(&args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compare two assets: returns, volatility, Sharpe, drawdowns and correlation.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./config.toml when it exists).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g., "debug").
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the metric cards and correlation analysis for the selected pair.
    Report(ReportArgs),
    /// Write per-asset and merged CSV tables for the selected pair.
    Export(ExportArgs),
    /// Score news headlines as positive, negative or neutral.
    Sentiment(SentimentArgs),
}

impl Commands {
    fn overrides(&self) -> Option<&ConfigOverrides> {
        match self {
            Commands::Report(args) => Some(&args.overrides),
            Commands::Export(args) => Some(&args.overrides),
            Commands::Sentiment(_) => None,
        }
    }
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Print the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Rows shown in the normalized / drawdown / volume sections.
    #[arg(long, default_value_t = 5)]
    tail: usize,
}

#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Output directory (defaults to data.export_directory).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser)]
struct SentimentArgs {
    /// Read headlines from a file, one per line.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Print scores as JSON.
    #[arg(long)]
    json: bool,

    /// Headlines to score.
    headlines: Vec<String>,
}

// ==============================================================================
// Data Loading
// ==============================================================================

/// Loads both configured assets and cuts them to the configured period.
///
/// The period ends on the earlier of the two last dates, so both series cover
/// the same window.
fn load_pair(config: &Config) -> Result<(PriceSeries, PriceSeries)> {
    let source = CsvPriceSource::new(&config.data.directory);
    let dashboard = &config.dashboard;

    let primary = source
        .load(&dashboard.primary_asset)
        .with_context(|| format!("Failed to load {}", dashboard.primary_asset))?;
    let secondary = source
        .load(&dashboard.secondary_asset)
        .with_context(|| format!("Failed to load {}", dashboard.secondary_asset))?;

    let (Some(last_a), Some(last_b)) = (primary.last(), secondary.last()) else {
        bail!(
            "No price data for {} or {}",
            dashboard.primary_asset,
            dashboard.secondary_asset
        );
    };
    let end = last_a.date.min(last_b.date);
    let start = period_start(end, dashboard.years);

    info!(%start, %end, years = dashboard.years, "Analysis period");
    Ok((primary.between(start, end), secondary.between(start, end)))
}

fn period_start(end: NaiveDate, years: u32) -> NaiveDate {
    end - Duration::days(365 * i64::from(years))
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_report(config: &Config, args: &ReportArgs) -> Result<()> {
    let (primary, secondary) = load_pair(config)?;
    let engine = AnalyticsEngine::new(config.analytics.clone())?;
    let report = engine.compare(&primary, &secondary);

    for asset in [&report.primary, &report.secondary] {
        if asset.observations < 2 {
            warn!(
                asset = %asset.asset,
                observations = asset.observations,
                "Too few observations; metrics shown as zero"
            );
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render::metrics_table(&report));
    for line in render::correlation_lines(&report) {
        println!("{line}");
    }

    let names = (primary.asset(), secondary.asset());
    let common_dates = inner_join(&primary, &secondary).dates;
    let tail_dates = &common_dates[common_dates.len().saturating_sub(args.tail)..];
    let dashboard = &config.dashboard;

    if dashboard.show_normalized {
        let a = by_date(engine.normalized(&primary).unwrap_or_default());
        let b = by_date(engine.normalized(&secondary).unwrap_or_default());
        let rows = tail_rows(tail_dates, |d| a.get(d).map(|v| format!("{v:.3}")), |d| {
            b.get(d).map(|v| format!("{v:.3}"))
        });
        println!("{}", render::tail_table("Normalized (z-score)", names, &rows));
    }

    if dashboard.show_drawdown {
        let a = by_date(engine.drawdowns(&primary));
        let b = by_date(engine.drawdowns(&secondary));
        let rows = tail_rows(tail_dates, |d| a.get(d).map(|v| format!("{v:.1}%")), |d| {
            b.get(d).map(|v| format!("{v:.1}%"))
        });
        println!("{}", render::tail_table("Drawdown", names, &rows));
    }

    if dashboard.show_volume {
        let volumes = |series: &PriceSeries| -> BTreeMap<NaiveDate, u64> {
            series
                .observations()
                .iter()
                .filter_map(|o| o.volume.map(|v| (o.date, v)))
                .collect()
        };
        let (a, b) = (volumes(&primary), volumes(&secondary));
        let rows = tail_rows(tail_dates, |d| a.get(d).map(u64::to_string), |d| {
            b.get(d).map(u64::to_string)
        });
        println!("{}", render::tail_table("Volume", names, &rows));
    }

    Ok(())
}

fn handle_export(config: &Config, args: &ExportArgs) -> Result<()> {
    let (primary, secondary) = load_pair(config)?;
    let out_dir = args
        .out
        .clone()
        .unwrap_or_else(|| config.data.export_directory.clone());
    let years = config.dashboard.years;

    for series in [&primary, &secondary] {
        let path = out_dir.join(export_file_name(series.asset(), years));
        write_series_csv(series, create_file(&path)?)
            .with_context(|| format!("Failed to export {}", series.asset()))?;
        info!(path = %path.display(), rows = series.len(), "Exported series");
    }

    let merged_path = out_dir.join(merged_file_name(primary.asset(), secondary.asset(), years));
    write_merged_csv(&primary, &secondary, create_file(&merged_path)?)
        .context("Failed to export merged table")?;
    info!(path = %merged_path.display(), "Exported merged table");

    Ok(())
}

fn handle_sentiment(args: &SentimentArgs) -> Result<()> {
    let mut headlines = Vec::new();
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        headlines.extend(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }
    headlines.extend(args.headlines.iter().cloned());

    if headlines.is_empty() {
        bail!("No headlines given; pass them as arguments or with --file");
    }

    let analyzer = SentimentAnalyzer::default();
    let scores = analyzer.score_all(headlines.iter().map(String::as_str));
    let summary = SentimentAnalyzer::summarize(&scores);

    if args.json {
        let rows: Vec<_> = headlines
            .iter()
            .zip(&scores)
            .map(|(h, s)| serde_json::json!({ "headline": h, "sentiment": s }))
            .collect();
        let out = serde_json::json!({ "headlines": rows, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", render::sentiment_table(&headlines, &scores));
    println!("{}", render::sentiment_summary_line(&summary));
    Ok(())
}

// ==============================================================================
// Helpers
// ==============================================================================

fn by_date(points: Vec<DatedValue>) -> BTreeMap<NaiveDate, f64> {
    points.into_iter().map(|p| (p.date, p.value)).collect()
}

fn tail_rows(
    dates: &[NaiveDate],
    left: impl Fn(&NaiveDate) -> Option<String>,
    right: impl Fn(&NaiveDate) -> Option<String>,
) -> Vec<(NaiveDate, Option<String>, Option<String>)> {
    dates.iter().map(|d| (*d, left(d), right(d))).collect()
}
