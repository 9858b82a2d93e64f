//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (span + 1)
//! Seed: EMA[0] = x[0] (non-adjusted form, no SMA warmup).
//! Lookback: 0.

use super::Indicator;
use crate::domain::PricePoint;

/// Recursive EMA update, seeded by the first pushed value.
#[derive(Debug, Clone)]
pub struct EmaState {
    alpha: f64,
    value: Option<f64>,
}

impl EmaState {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
            value: None,
        }
    }

    pub fn push(&mut self, x: f64) -> f64 {
        let next = match self.value {
            Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
            None => x,
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let mut state = EmaState::new(self.span);
        points.iter().map(|p| state.push(p.close)).collect()
    }
}

/// Reference EMA over a plain slice, for checking the streaming indicators.
#[cfg(test)]
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let mut state = EmaState::new(span);
    values.iter().map(|&v| state.push(v)).collect()
}
