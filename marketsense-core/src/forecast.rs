//! Forecast engine: closed-form linear trend over the trailing closes.
//!
//! The regression uses the integer position inside the window as x, not the
//! calendar date, and forecast dates step one calendar day at a time with no
//! trading-calendar awareness.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ForecastConfig, DEFAULT_FORECAST_DAYS};
use crate::domain::PricePoint;
use crate::error::InvalidInputError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_close: f64,
}

/// Least-squares line `y = slope * x + intercept` with `x = 0..n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit against `ys`, using each value's index as x.
    ///
    /// Returns `None` for an empty slice. A single value gives a flat line
    /// through it.
    pub fn fit(ys: &[f64]) -> Option<Self> {
        let first = *ys.first()?;
        if ys.len() == 1 {
            return Some(Self {
                slope: 0.0,
                intercept: first,
            });
        }

        let n_f = ys.len() as f64;
        let x_mean = (n_f - 1.0) / 2.0;
        let y_mean = ys.iter().sum::<f64>() / n_f;

        let (sxy, sxx) = ys
            .iter()
            .enumerate()
            .fold((0.0_f64, 0.0_f64), |(sxy, sxx), (i, &y)| {
                let dx = i as f64 - x_mean;
                (sxy + dx * (y - y_mean), sxx + dx * dx)
            });

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Forecast `days` calendar days past the last point with the default
/// 30-point regression window.
///
/// # Precondition
/// `series` is sorted ascending by date with unique dates. It is not re-sorted.
pub fn predict_next_days(
    series: &[PricePoint],
    days: usize,
) -> Result<Vec<ForecastPoint>, InvalidInputError> {
    predict_next_days_with(series, days, &ForecastConfig::default())
}

/// [`predict_next_days`] with the default horizon.
pub fn predict_default(series: &[PricePoint]) -> Result<Vec<ForecastPoint>, InvalidInputError> {
    predict_next_days(series, DEFAULT_FORECAST_DAYS)
}

/// Forecast with an explicit regression window; `config.horizon` is ignored
/// in favour of `days`.
pub fn predict_next_days_with(
    series: &[PricePoint],
    days: usize,
    config: &ForecastConfig,
) -> Result<Vec<ForecastPoint>, InvalidInputError> {
    if days == 0 {
        return Err(InvalidInputError::NonPositiveHorizon { days });
    }
    let last = series.last().ok_or(InvalidInputError::EmptySeries)?;
    let out_of_range = InvalidInputError::HorizonOutOfRange {
        last: last.date,
        days,
    };
    let steps = u64::try_from(days).map_err(|_| out_of_range.clone())?;
    let horizon_end = last
        .date
        .checked_add_days(Days::new(steps))
        .ok_or_else(|| out_of_range.clone())?;

    let start = series.len().saturating_sub(config.window.max(1));
    let ys: Vec<f64> = series[start..].iter().map(|p| p.close).collect();
    let trend = LinearTrend::fit(&ys).ok_or(InvalidInputError::EmptySeries)?;
    let n = ys.len();
    debug!(
        window = n,
        slope = trend.slope,
        intercept = trend.intercept,
        days,
        %horizon_end,
        "fitted forecast trend"
    );

    (1..=steps)
        .zip(n..)
        .map(|(step, x)| {
            last.date
                .checked_add_days(Days::new(step))
                .map(|date| ForecastPoint {
                    date,
                    predicted_close: trend.at(x as f64),
                })
                .ok_or_else(|| out_of_range.clone())
        })
        .collect()
}
