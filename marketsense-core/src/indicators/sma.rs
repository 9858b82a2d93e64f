//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a lookback window.
//! Lookback: period - 1 (first valid value at index period-1). The window is
//! never partially filled.

use std::collections::VecDeque;

use super::Indicator;
use crate::domain::PricePoint;

/// Sliding-window sum over the last `period` values.
///
/// `push` returns the window mean once the window is full, `None` before.
/// A window holding only zeros has a mean of exactly `0.0`: the running sum is
/// reset when the last nonzero value leaves, dropping accumulated rounding.
#[derive(Debug, Clone)]
pub struct RollingMean {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
    nonzero: usize,
}

impl RollingMean {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "rolling window must be >= 1");
        Self {
            period,
            window: VecDeque::with_capacity(period),
            sum: 0.0,
            nonzero: 0,
        }
    }

    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.window.push_back(value);
        self.sum += value;
        if value != 0.0 {
            self.nonzero += 1;
        }
        if self.window.len() > self.period {
            if let Some(leaving) = self.window.pop_front() {
                self.sum -= leaving;
                if leaving != 0.0 {
                    self.nonzero -= 1;
                }
            }
        }
        if self.nonzero == 0 {
            self.sum = 0.0;
        }
        self.mean()
    }

    /// Current window mean, `None` until `period` values have been pushed.
    pub fn mean(&self) -> Option<f64> {
        if self.window.len() == self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let mut acc = RollingMean::new(self.period);
        points
            .iter()
            .map(|p| acc.push(p.close).unwrap_or(f64::NAN))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_points, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let points = make_points(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let result = Sma::new(5).compute(&points);

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().take(4).enumerate() {
            assert!(v.is_nan(), "expected NaN at index {i}");
        }
        // SMA[4] = mean(10,11,12,13,14) = 12.0
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        // SMA[5] = mean(11,12,13,14,15) = 13.0
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        // SMA[6] = mean(12,13,14,15,16) = 14.0
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_close() {
        let points = make_points(&[100.0, 200.0, 300.0]);
        let result = Sma::new(1).compute(&points);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_lookback() {
        assert_eq!(Sma::new(20).lookback(), 19);
        assert_eq!(Sma::new(1).lookback(), 0);
    }

    #[test]
    fn sma_too_few_points() {
        let points = make_points(&[10.0, 11.0]);
        let result = Sma::new(5).compute(&points);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rolling_mean_evicts_oldest() {
        let mut acc = RollingMean::new(2);
        assert_eq!(acc.push(1.0), None);
        assert_eq!(acc.push(3.0), Some(2.0));
        assert_eq!(acc.push(5.0), Some(4.0));
        assert_eq!(acc.mean(), Some(4.0));
    }

    #[test]
    fn rolling_mean_all_zero_window_is_exact() {
        // Adding then removing these leaves a residue in a plain running sum.
        let mut acc = RollingMean::new(2);
        for v in [0.1, 0.2, 0.7, 1e-3] {
            acc.push(v);
        }
        acc.push(0.0);
        assert_eq!(acc.push(0.0), Some(0.0));
        assert_eq!(acc.push(0.3), Some(0.15));
    }
}
