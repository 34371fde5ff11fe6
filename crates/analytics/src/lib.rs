//! # Tandem Analytics Engine
//!
//! This crate turns price histories into the figures a two-asset comparison
//! dashboard shows: total return, volatility, Sharpe ratio, drawdowns, z-score
//! normalization and rolling correlation, plus headline sentiment.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no knowledge of where series come from. It
//!   depends only on `core-types` and the `AnalyticsSettings` of `configuration`.
//! - **Stateless calculation:** every function and every `AnalyticsEngine`
//!   method is a pure function of its inputs; identical input yields
//!   bit-identical output, and concurrent use needs no locking.
//! - **Sentinels, not errors:** degenerate input (too short, no variance)
//!   yields `0.0`, `None` or a shorter output. Input shape is validated once,
//!   when a `PriceSeries` is constructed.
//! - **Inner-join alignment:** anything involving two assets runs on the dates
//!   both have traded, never on forward-filled gaps.
//!
//! ## Public API
//!
//! - `metrics`: the free metric functions over `&[f64]`.
//! - `align::inner_join`: date intersection of two series.
//! - `AnalyticsEngine`: builds `AssetReport` / `ComparisonReport` from series.
//! - `sentiment`: `SentimentAnalyzer` for headline labelling.
//! - `AnalyticsError`: the errors returned when building an engine.

// Declare the modules that constitute this crate.
pub mod align;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod report;
pub mod sentiment;

// Re-export the key components to create a clean, public-facing API.
pub use align::{AlignedPair, ReturnPair, inner_join};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{AssetReport, ComparisonReport, RollingSummary};
pub use sentiment::{FinancialLexicon, SentimentAnalyzer, SentimentSummary};
