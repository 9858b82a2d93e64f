//! Indicator trait, single-pass accumulators and concrete indicators.
//!
//! Indicators are pure functions: price history in, numeric series out. The
//! output has one value per input point; warmup positions hold `f64::NAN`.
//! The snapshot engine only reads the final position, via [`Indicator::latest`].
//!
//! Rolling and exponential averages are expressed as stateful accumulators
//! ([`RollingMean`], [`EmaState`]) fed one value at a time.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

#[cfg(test)]
pub use ema::ema_of_series;
pub use ema::{Ema, EmaState};
pub use macd::{Macd, MacdLine};
pub use rsi::Rsi;
pub use sma::{RollingMean, Sma};

use crate::domain::PricePoint;

/// Trait for indicators.
///
/// # Look-ahead contamination guard
/// No value at index t may depend on a point at t+1 or later. Every indicator
/// must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of points needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire series.
    ///
    /// Returns a `Vec<f64>` of the same length as `points`.
    /// The first `lookback()` values are `f64::NAN`.
    fn compute(&self, points: &[PricePoint]) -> Vec<f64>;

    /// Value at the last point, or `None` when the series is too short.
    fn latest(&self, points: &[PricePoint]) -> Option<f64> {
        if points.len() <= self.lookback() {
            return None;
        }
        self.compute(points).last().copied().filter(|v| !v.is_nan())
    }
}

/// Create synthetic points from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first point),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_points(closes: &[f64]) -> Vec<PricePoint> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PricePoint {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
