//! MarketSense Core — indicator snapshot and trend forecast for daily OHLCV series.
//!
//! This crate contains:
//! - Domain types (`PricePoint`)
//! - Indicators built on single-pass accumulators (SMA, EMA, RSI, MACD)
//! - The indicator engine (`snapshot::compute_indicators`)
//! - The forecast engine (`forecast::predict_next_days`)
//! - TOML configuration, offline data loaders and the combined report
//!
//! Both engines are pure: they read the input slice, allocate their output and
//! touch no shared state, so they can be called from any number of threads.

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod indicators;
pub mod report;
pub mod snapshot;

pub use config::{AnalysisConfig, ForecastConfig, IndicatorConfig, DEFAULT_FORECAST_DAYS};
pub use domain::PricePoint;
pub use error::InvalidInputError;
pub use forecast::{predict_next_days, ForecastPoint, LinearTrend};
pub use report::{analyze, AnalysisReport, HistoryRow};
pub use snapshot::{compute_indicators, IndicatorSnapshot, MacdSignal, RsiSignal, Trend};
