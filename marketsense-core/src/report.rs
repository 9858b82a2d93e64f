//! Analysis report: the series plus both engine outputs for one symbol.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AnalysisConfig;
use crate::domain::PricePoint;
use crate::error::InvalidInputError;
use crate::forecast::{predict_next_days_with, ForecastPoint};
use crate::snapshot::{compute_indicators_with, IndicatorSnapshot};

/// One row of the report's `data` list, keyed `Date`, `Open`, `High`, `Low`,
/// `Close`, `Volume` like the provider's history export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<PricePoint> for HistoryRow {
    fn from(p: PricePoint) -> Self {
        Self {
            date: p.date,
            open: p.open,
            high: p.high,
            low: p.low,
            close: p.close,
            volume: p.volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub data: Vec<HistoryRow>,
    pub technical_indicators: IndicatorSnapshot,
    pub predictions: Vec<ForecastPoint>,
}

/// Run both engines with `config` and bundle the results.
///
/// The series must already be canonical (ascending, unique dates).
pub fn analyze(
    symbol: &str,
    points: Vec<PricePoint>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, InvalidInputError> {
    let technical_indicators = compute_indicators_with(&points, &config.indicators)?;
    let predictions = predict_next_days_with(&points, config.forecast.horizon, &config.forecast)?;
    info!(
        symbol,
        points = points.len(),
        trend = ?technical_indicators.trend,
        "analysis complete"
    );

    Ok(AnalysisReport {
        symbol: symbol.to_string(),
        data: points.into_iter().map(HistoryRow::from).collect(),
        technical_indicators,
        predictions,
    })
}
